use crate::fracture::cloud::{Event, EventCloud};
use crate::geometry::{Coordinate, Displacement, GeometryError};
use crate::prelude::{CoreError, CoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::iter::{Enumerate, FusedIterator};
use std::slice;

/// Per-event data-quality predicate. Non-finite scores never pass a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum QualityGate {
    /// Scores where lower is better, e.g. location uncertainty.
    AtMost(f64),
    /// Scores where higher is better, e.g. pick confidence.
    AtLeast(f64),
    Any,
}

impl QualityGate {
    pub fn admits(&self, quality: f64) -> bool {
        match *self {
            QualityGate::AtMost(limit) => quality.is_finite() && quality <= limit,
            QualityGate::AtLeast(limit) => quality.is_finite() && quality >= limit,
            QualityGate::Any => true,
        }
    }
}

/// Selects the events of the start area around the port point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialAdmissionFilter {
    reference: Coordinate,
    radius: f64,
    gate: QualityGate,
}

impl SpatialAdmissionFilter {
    pub fn new(reference: Coordinate, radius: f64, gate: QualityGate) -> CoreResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CoreError::InvalidRadius(radius));
        }
        if !reference.is_finite() {
            return Err(CoreError::InvalidParameters(format!(
                "reference point {reference:?} is not finite"
            )));
        }
        Ok(Self {
            reference,
            radius,
            gate,
        })
    }

    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn gate(&self) -> QualityGate {
        self.gate
    }

    /// Whether a single event belongs to the start area. The sphere boundary
    /// is inclusive.
    pub fn evaluate(&self, event: &Event) -> Result<bool, GeometryError> {
        let distance = Displacement::between(&self.reference, &event.location)?.length();
        Ok(distance <= self.radius && self.gate.admits(event.quality))
    }

    /// Ascending indices of admitted events, evaluated lazily.
    pub fn admitted<'a>(&'a self, cloud: &'a EventCloud) -> AdmittedEvents<'a> {
        AdmittedEvents {
            filter: self,
            events: cloud.events().iter().enumerate(),
        }
    }
}

/// Ascending admitted indices of one pass over a cloud. Every call to
/// [`SpatialAdmissionFilter::admitted`] starts a new pass from the first event.
#[derive(Clone)]
pub struct AdmittedEvents<'a> {
    filter: &'a SpatialAdmissionFilter,
    events: Enumerate<slice::Iter<'a, Event>>,
}

impl Iterator for AdmittedEvents<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        for (index, event) in self.events.by_ref() {
            match self.filter.evaluate(event) {
                Ok(true) => return Some(index),
                Ok(false) => {}
                Err(err) => debug!("event {index} excluded from start area: {err}"),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.events.size_hint().1)
    }
}

impl FusedIterator for AdmittedEvents<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_filter(radius: f64) -> SpatialAdmissionFilter {
        SpatialAdmissionFilter::new(Coordinate::new(0.0, 0.0, 0.0), radius, QualityGate::Any)
            .unwrap()
    }

    fn event(x: f64, y: f64, altitude: f64) -> Event {
        Event::new(Coordinate::new(x, y, altitude), 0.0)
    }

    #[test]
    fn radius_must_be_positive() {
        let origin = Coordinate::new(0.0, 0.0, 0.0);
        for radius in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                SpatialAdmissionFilter::new(origin, radius, QualityGate::Any),
                Err(CoreError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn boundary_is_inclusive() {
        let filter = origin_filter(5.0);
        assert_eq!(filter.evaluate(&event(3.0, 4.0, 0.0)), Ok(true));
        assert_eq!(filter.evaluate(&event(0.0, 0.0, 5.0)), Ok(true));
        assert_eq!(filter.evaluate(&event(0.0, 0.0, 5.0 + 1e-9)), Ok(false));
        assert_eq!(filter.evaluate(&event(0.0, -5.001, 0.0)), Ok(false));
    }

    #[test]
    fn quality_gate_applies_after_distance() {
        let filter = SpatialAdmissionFilter::new(
            Coordinate::new(0.0, 0.0, 0.0),
            10.0,
            QualityGate::AtMost(2.0),
        )
        .unwrap();
        let near = Coordinate::new(1.0, 1.0, 1.0);
        assert_eq!(filter.evaluate(&Event::new(near, 2.0)), Ok(true));
        assert_eq!(filter.evaluate(&Event::new(near, 2.5)), Ok(false));
        assert_eq!(filter.evaluate(&Event::new(near, f64::NAN)), Ok(false));
    }

    #[test]
    fn at_least_gate_rejects_low_scores() {
        assert!(QualityGate::AtLeast(0.5).admits(0.7));
        assert!(!QualityGate::AtLeast(0.5).admits(0.2));
        assert!(QualityGate::Any.admits(f64::NAN));
    }

    #[test]
    fn malformed_event_is_skipped_not_fatal() {
        let filter = origin_filter(10.0);
        let cloud = EventCloud::new(vec![
            event(1.0, 0.0, 0.0),
            event(f64::NAN, 0.0, 0.0),
            event(0.0, f64::INFINITY, 0.0),
            event(0.0, 2.0, 0.0),
        ]);
        assert_eq!(
            filter.evaluate(&cloud.events()[1]),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(filter.admitted(&cloud).collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn admitted_indices_are_sorted_unique_and_bounded() {
        let mut state: u64 = 17;
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (1u64 << 31) as f64) * 40.0 - 20.0
        };
        let cloud: EventCloud = (0..300)
            .map(|_| event(next(), next(), next()))
            .collect();

        let filter = origin_filter(15.0);
        let admitted: Vec<usize> = filter.admitted(&cloud).collect();
        assert!(!admitted.is_empty());
        assert!(admitted.len() < cloud.len());
        assert!(admitted.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(admitted.iter().all(|&idx| idx < cloud.len()));
        assert_eq!(admitted, filter.admitted(&cloud).collect::<Vec<_>>());
    }

    #[test]
    fn empty_cloud_yields_nothing() {
        let filter = origin_filter(1.0);
        assert_eq!(filter.admitted(&EventCloud::default()).count(), 0);
    }
}

use crate::geometry::{Coordinate, Displacement, GeometryError};
use crate::math::angles::{circular_median, normalize};
use crate::prelude::{CoreError, CoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// How event bearings are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BearingMode {
    /// Opposite bearings describe the same fracture plane; results lie in `[0, π)`.
    #[default]
    Axial,
    /// Bearings are kept on the full circle; results lie in `[0, 2π)`.
    Directional,
}

impl BearingMode {
    pub fn period(&self) -> f64 {
        match self {
            BearingMode::Axial => PI,
            BearingMode::Directional => TAU,
        }
    }
}

/// Median bearing of a set of event locations seen from a reference point.
///
/// Bearings are measured clockwise from north (+y) on the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AzimuthEstimator {
    reference: Coordinate,
    mode: BearingMode,
}

impl AzimuthEstimator {
    pub fn new(reference: Coordinate, mode: BearingMode) -> Self {
        Self { reference, mode }
    }

    pub fn mode(&self) -> BearingMode {
        self.mode
    }

    pub fn bearing(&self, location: &Coordinate) -> Result<f64, GeometryError> {
        let bearing = Displacement::between(&self.reference, location)?.bearing()?;
        Ok(normalize(bearing, self.mode.period()))
    }

    /// Bearings of every location that has one; events straight above or
    /// below the reference are skipped.
    pub fn bearings<'a, I>(&self, locations: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        locations
            .into_iter()
            .filter_map(|location| match self.bearing(location) {
                Ok(bearing) => Some(bearing),
                Err(err) => {
                    debug!("skipping bearing for {location:?}: {err}");
                    None
                }
            })
            .collect()
    }

    pub fn median_azimuth<'a, I>(&self, locations: I) -> CoreResult<f64>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let bearings = self.bearings(locations);
        circular_median(&bearings, self.mode.period()).ok_or(CoreError::NoEventsInRange)
    }
}

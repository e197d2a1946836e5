use crate::fracture::admission::{AdmittedEvents, QualityGate, SpatialAdmissionFilter};
use crate::fracture::azimuth::{AzimuthEstimator, BearingMode};
use crate::fracture::cloud::EventCloud;
use crate::geometry::{Coordinate, VectorDirection};
use crate::math::angles::normalize;
use crate::prelude::{CoreResult, TracerConfig};
use crate::telemetry::log::LogManager;
use std::sync::OnceLock;

/// Fracture azimuth over the start area of one injection port.
///
/// The tracer is built once per analysis. Its inputs never change, so the
/// median azimuth is computed on first request and kept for the lifetime of
/// the instance.
pub struct FractureAzimuthTracer {
    cloud: EventCloud,
    admission: SpatialAdmissionFilter,
    estimator: AzimuthEstimator,
    well: Option<VectorDirection>,
    median_azimuth: OnceLock<CoreResult<f64>>,
    logger: LogManager,
}

impl FractureAzimuthTracer {
    /// Tracer admitting events within `config.radius` of `port_point` whose
    /// quality score does not exceed `config.max_quality`.
    pub fn new(
        cloud: EventCloud,
        port_point: Coordinate,
        config: TracerConfig,
    ) -> CoreResult<Self> {
        let admission = SpatialAdmissionFilter::new(
            port_point,
            config.radius,
            QualityGate::AtMost(config.max_quality),
        )?;
        Ok(Self::with_admission(cloud, admission, config.mode))
    }

    pub fn with_admission(
        cloud: EventCloud,
        admission: SpatialAdmissionFilter,
        mode: BearingMode,
    ) -> Self {
        Self {
            cloud,
            estimator: AzimuthEstimator::new(admission.reference(), mode),
            admission,
            well: None,
            median_azimuth: OnceLock::new(),
            logger: LogManager::new("tracer"),
        }
    }

    pub fn with_well(mut self, well: VectorDirection) -> Self {
        self.well = Some(well);
        self
    }

    pub fn cloud(&self) -> &EventCloud {
        &self.cloud
    }

    pub fn port_point(&self) -> Coordinate {
        self.admission.reference()
    }

    pub fn radius(&self) -> f64 {
        self.admission.radius()
    }

    pub fn well(&self) -> Option<VectorDirection> {
        self.well
    }

    pub fn mode(&self) -> BearingMode {
        self.estimator.mode()
    }

    /// Indices of the events in the start area, in cloud order. Each call
    /// evaluates the admission rule afresh.
    pub fn admitted_events(&self) -> AdmittedEvents<'_> {
        self.admission.admitted(&self.cloud)
    }

    /// Median fracture azimuth of the admitted events, computed once.
    pub fn median_azimuth(&self) -> CoreResult<f64> {
        self.median_azimuth
            .get_or_init(|| self.compute_median_azimuth())
            .clone()
    }

    pub fn is_azimuth_cached(&self) -> bool {
        self.median_azimuth.get().is_some()
    }

    /// Azimuth measured from the well's azimuth, when a well was supplied.
    pub fn relative_azimuth(&self) -> Option<CoreResult<f64>> {
        let well = self.well?;
        let period = self.estimator.mode().period();
        Some(
            self.median_azimuth()
                .map(|azimuth| normalize(azimuth - well.azimuth(), period)),
        )
    }

    fn compute_median_azimuth(&self) -> CoreResult<f64> {
        let locations = self
            .admitted_events()
            .filter_map(|index| self.cloud.get(index))
            .map(|event| &event.location);
        let result = self.estimator.median_azimuth(locations);
        match &result {
            Ok(azimuth) => self.logger.record(&format!(
                "median azimuth {:.4} rad ({:?}) from a cloud of {} events",
                azimuth,
                self.estimator.mode(),
                self.cloud.len()
            )),
            Err(err) => self.logger.record(&format!("no azimuth: {err}")),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angles::circular_distance;
    use crate::prelude::CoreError;
    use ndarray::array;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn port_point() -> Coordinate {
        Coordinate::new(0.0, 10.0, -10.0)
    }

    fn tracer(cloud: EventCloud) -> FractureAzimuthTracer {
        FractureAzimuthTracer::new(cloud, port_point(), TracerConfig::default()).unwrap()
    }

    fn admitted(rows: ndarray::Array2<f64>) -> Vec<usize> {
        let cloud = EventCloud::from_rows(rows.view()).unwrap();
        tracer(cloud).admitted_events().collect()
    }

    /// Two opposite wings along `axis` plus a few off-axis events.
    fn bimodal_cloud(axis: f64) -> EventCloud {
        let port = port_point();
        let place = |bearing: f64, distance: f64| {
            crate::fracture::Event::new(
                Coordinate::new(
                    port.x + distance * bearing.sin(),
                    port.y + distance * bearing.cos(),
                    port.altitude + 2.0,
                ),
                1.0,
            )
        };
        let mut events = Vec::new();
        for step in 1..=5 {
            events.push(place(axis, 2.0 * step as f64));
            events.push(place(axis + PI, 2.0 * step as f64));
        }
        events.push(place(axis + 0.9, 6.0));
        events.push(place(axis - 1.2, 7.0));
        EventCloud::new(events)
    }

    #[test]
    fn start_area_admits_all_nearby_events() {
        let rows = array![
            [0.0, 1.0, 2.0, 3.0, 4.0],
            [4.0, 7.0, 5.0, 3.0, 4.0],
            [0.0, 11.0, 5.0, 2.0, 0.0]
        ];
        assert_eq!(admitted(rows), vec![0, 1, 2]);
    }

    #[test]
    fn start_area_excludes_distant_and_low_quality_events() {
        let rows = array![
            [0.0, 1.0, 90.0, 99.0, 4.0],
            [1.0, 7.0, 89.0, 9.0, 4.0],
            [0.0, 1.0, 2.0, 99.0, 4.0]
        ];
        assert_eq!(admitted(rows), Vec::<usize>::new());
    }

    #[test]
    fn start_area_excludes_single_distant_event() {
        let rows = array![
            [0.0, 1.0, 2.0, 3.0, 4.0],
            [1.0, 15.0, 101.0, 9.0, 4.0],
            [0.0, 2.0, 2.0, 5.0, 4.0]
        ];
        assert_eq!(admitted(rows), vec![0, 2]);
    }

    #[test]
    fn admitted_events_can_be_enumerated_repeatedly() {
        let tracer = tracer(bimodal_cloud(0.3));
        let first: Vec<usize> = tracer.admitted_events().collect();
        let second: Vec<usize> = tracer.admitted_events().collect();
        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
    }

    #[test]
    fn median_azimuth_of_reference_scenario() {
        let rows = array![
            [0.0, 1.0, 2.0, 3.0],
            [4.0, 7.0, 5.0, 3.0],
            [0.0, 11.0, 5.0, 2.0]
        ];
        let cloud = EventCloud::from_rows(rows.view()).unwrap();

        let axial = tracer(cloud.clone()).median_azimuth().unwrap();
        assert!(circular_distance(axial, 0.0, PI) < 1e-9, "axial {axial}");

        let config = TracerConfig {
            mode: BearingMode::Directional,
            ..TracerConfig::default()
        };
        let directional = FractureAzimuthTracer::new(cloud, port_point(), config)
            .unwrap()
            .median_azimuth()
            .unwrap();
        assert!((directional - 4.0f64.atan2(-3.0)).abs() < 1e-12);
    }

    #[test]
    fn median_azimuth_recovers_bimodal_axis_despite_outliers() {
        for axis in [0.0, 0.45, FRAC_PI_2, 2.9] {
            let azimuth = tracer(bimodal_cloud(axis)).median_azimuth().unwrap();
            assert!(
                circular_distance(azimuth, axis, PI) < 1e-9,
                "axis {axis} -> {azimuth}"
            );
        }
    }

    #[test]
    fn median_azimuth_is_cached_after_first_access() {
        let tracer = tracer(bimodal_cloud(1.0));
        assert!(!tracer.is_azimuth_cached());
        let first = tracer.median_azimuth();
        assert!(tracer.is_azimuth_cached());
        assert_eq!(tracer.median_azimuth(), first);
    }

    #[test]
    fn empty_start_area_reports_no_events() {
        let far = crate::fracture::Event::new(Coordinate::new(500.0, 500.0, 0.0), 0.0);
        let tracer = tracer(EventCloud::new(vec![far]));
        assert_eq!(tracer.admitted_events().count(), 0);
        assert_eq!(tracer.median_azimuth(), Err(CoreError::NoEventsInRange));
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let config = TracerConfig {
            radius: 0.0,
            ..TracerConfig::default()
        };
        assert!(matches!(
            FractureAzimuthTracer::new(EventCloud::default(), port_point(), config),
            Err(CoreError::InvalidRadius(_))
        ));
    }

    #[test]
    fn relative_azimuth_uses_well_direction() {
        let tracer = tracer(bimodal_cloud(0.7));
        assert!(tracer.relative_azimuth().is_none());

        let well = VectorDirection::new(0.2, 0.5).unwrap();
        let tracer = tracer.with_well(well);
        let relative = tracer.relative_azimuth().unwrap().unwrap();
        assert!((relative - 0.5).abs() < 1e-9, "relative {relative}");
    }

    #[test]
    fn cached_azimuth_is_shared_across_threads() {
        let tracer = tracer(bimodal_cloud(2.0));
        let results: Vec<CoreResult<f64>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| tracer.median_azimuth()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(tracer.is_azimuth_cached());
    }
}

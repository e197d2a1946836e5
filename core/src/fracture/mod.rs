pub mod admission;
pub mod azimuth;
pub mod cloud;
pub mod tracer;

pub use admission::{AdmittedEvents, QualityGate, SpatialAdmissionFilter};
pub use azimuth::{AzimuthEstimator, BearingMode};
pub use cloud::{Event, EventCloud};
pub use tracer::FractureAzimuthTracer;

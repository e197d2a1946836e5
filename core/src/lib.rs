//! Numeric core for microseismic monitoring of hydraulic-fracturing jobs.
//!
//! Two independent paths share the value types defined here: waveform
//! filtration (band limiting and STA/LTA onset detection) and fracture
//! tracing (spatial admission of located events around the injection port
//! and a robust median of their bearings).

pub mod filtration;
pub mod fracture;
pub mod geometry;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod signal;
pub mod telemetry;

pub use prelude::{CoreError, CoreResult, Filtration, TracerConfig};
pub use signal::Signal;

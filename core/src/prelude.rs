use crate::fracture::azimuth::BearingMode;
use crate::signal::Signal;
use serde::{Deserialize, Serialize};

/// Error kinds surfaced at the core boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid frequency range: {0}")]
    InvalidRange(String),
    #[error("signal contains no samples")]
    EmptySignal,
    #[error("invalid sample rate {0}")]
    InvalidSampleRate(f64),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("invalid radius {0}")]
    InvalidRadius(f64),
    #[error("invalid direction: {0}")]
    InvalidDirection(String),
    #[error("malformed event cloud: {0}")]
    MalformedCloud(String),
    #[error("no events in range")]
    NoEventsInRange,
}

pub type CoreResult<T> = Result<T, CoreError>;

/// A waveform transform producing a new signal from an immutable input.
pub trait Filtration {
    fn name(&self) -> &'static str;
    fn run(&self, signal: &Signal) -> CoreResult<Signal>;
}

/// Tuning shared by every fracture trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Radius of the start area around the port point.
    pub radius: f64,
    /// Largest event quality score still admitted.
    pub max_quality: f64,
    pub mode: BearingMode,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            max_quality: 10.0,
            mode: BearingMode::Axial,
        }
    }
}

pub mod bandpass;
pub mod params;
pub mod slta;

pub use bandpass::BandPassFilter;
pub use params::{Range, SltaParameters};
pub use slta::StaLtaDetector;

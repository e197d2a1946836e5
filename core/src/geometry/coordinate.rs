use serde::{Deserialize, Serialize};

/// Point in the survey frame: `x` east, `y` north, `altitude` up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub altitude: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64, altitude: f64) -> Self {
        Self { x, y, altitude }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.altitude.is_finite()
    }
}

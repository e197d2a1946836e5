use crate::geometry::coordinate::Coordinate;
use crate::math::angles::normalize_full;
use crate::prelude::{CoreError, CoreResult};
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

/// Horizontal offsets below this length have no meaningful bearing.
const MIN_HORIZONTAL_LENGTH: f64 = 1e-9;

/// Failure to derive geometry for a single event.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("non-finite component in displacement")]
    NonFinite,
    #[error("horizontal offset too small for a bearing")]
    DegenerateBearing,
}

/// Orientation in the survey frame.
///
/// `azimuth` is measured clockwise from north (+y) and lies in `[0, 2π)`;
/// `inclination` is the angle above the horizontal plane in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorDirection {
    azimuth: f64,
    inclination: f64,
}

impl VectorDirection {
    /// Builds a direction, wrapping the azimuth into `[0, 2π)`.
    pub fn new(azimuth: f64, inclination: f64) -> CoreResult<Self> {
        if !azimuth.is_finite() || !inclination.is_finite() {
            return Err(CoreError::InvalidDirection(format!(
                "azimuth {azimuth} and inclination {inclination} must be finite"
            )));
        }
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&inclination) {
            return Err(CoreError::InvalidDirection(format!(
                "inclination {inclination} outside [-pi/2, pi/2]"
            )));
        }
        Ok(Self {
            azimuth: normalize_full(azimuth),
            inclination,
        })
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }
}

/// Displacement between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Displacement {
    /// Vector pointing from `origin` to `target`.
    pub fn between(origin: &Coordinate, target: &Coordinate) -> Result<Self, GeometryError> {
        let displacement = Self {
            dx: target.x - origin.x,
            dy: target.y - origin.y,
            dz: target.altitude - origin.altitude,
        };
        let finite = [displacement.dx, displacement.dy, displacement.dz]
            .iter()
            .all(|component| component.is_finite());
        if finite {
            Ok(displacement)
        } else {
            Err(GeometryError::NonFinite)
        }
    }

    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy + self.dz * self.dz).sqrt()
    }

    pub fn horizontal_length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Bearing of the horizontal projection, clockwise from north, in `[0, 2π)`.
    pub fn bearing(&self) -> Result<f64, GeometryError> {
        if self.horizontal_length() < MIN_HORIZONTAL_LENGTH {
            return Err(GeometryError::DegenerateBearing);
        }
        Ok(normalize_full(self.dx.atan2(self.dy)))
    }

    pub fn direction(&self) -> Result<VectorDirection, GeometryError> {
        let azimuth = self.bearing()?;
        let inclination = self.dz.atan2(self.horizontal_length());
        Ok(VectorDirection {
            azimuth,
            inclination,
        })
    }
}

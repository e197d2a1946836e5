use crate::prelude::{CoreError, CoreResult};
use serde::Serialize;

/// Closed frequency interval `[min, max]` in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> CoreResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CoreError::InvalidRange(format!(
                "bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min < 0.0 {
            return Err(CoreError::InvalidRange(format!(
                "lower bound {min} is negative"
            )));
        }
        if min >= max {
            return Err(CoreError::InvalidRange(format!(
                "lower bound {min} is not below upper bound {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, frequency: f64) -> bool {
        (self.min..=self.max).contains(&frequency)
    }

    /// The band has to fit below the Nyquist frequency of the sampled signal.
    pub fn check_nyquist(&self, sample_rate: f64) -> CoreResult<()> {
        let nyquist = sample_rate / 2.0;
        if self.max > nyquist {
            return Err(CoreError::InvalidRange(format!(
                "upper bound {} exceeds Nyquist frequency {nyquist}",
                self.max
            )));
        }
        Ok(())
    }
}

/// STA/LTA window lengths in seconds and the contrast exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SltaParameters {
    short_window: f64,
    long_window: f64,
    rank: f64,
}

impl SltaParameters {
    pub fn new(short_window: f64, long_window: f64, rank: f64) -> CoreResult<Self> {
        if !short_window.is_finite() || !long_window.is_finite() || !rank.is_finite() {
            return Err(CoreError::InvalidParameters(
                "windows and rank must be finite".into(),
            ));
        }
        if short_window <= 0.0 || short_window >= long_window {
            return Err(CoreError::InvalidParameters(format!(
                "expected 0 < short window ({short_window}) < long window ({long_window})"
            )));
        }
        if rank <= 0.0 {
            return Err(CoreError::InvalidParameters(format!(
                "rank {rank} must be positive"
            )));
        }
        Ok(Self {
            short_window,
            long_window,
            rank,
        })
    }

    pub fn short_window(&self) -> f64 {
        self.short_window
    }

    pub fn long_window(&self) -> f64 {
        self.long_window
    }

    pub fn rank(&self) -> f64 {
        self.rank
    }

    /// Short and long window lengths in samples, rounded to the nearest sample.
    pub fn window_samples(&self, sample_rate: f64) -> CoreResult<(usize, usize)> {
        let short_len = (self.short_window * sample_rate).round();
        let long_len = (self.long_window * sample_rate).round();
        if short_len < 1.0 {
            return Err(CoreError::InvalidParameters(format!(
                "short window {} s is shorter than one sample at {sample_rate} Hz",
                self.short_window
            )));
        }
        if short_len >= long_len {
            return Err(CoreError::InvalidParameters(format!(
                "short window ({short_len} samples) must be shorter than long window ({long_len} samples)"
            )));
        }
        Ok((short_len as usize, long_len as usize))
    }
}

use crate::prelude::{CoreError, CoreResult};
use serde::Serialize;

/// Immutable waveform: a sample rate in Hz and the ordered amplitudes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    sample_rate: f64,
    data: Vec<f64>,
}

impl Signal {
    /// Builds a signal; the sample rate must be finite and positive and every
    /// sample finite.
    ///
    /// Empty data is accepted here and rejected by the transforms.
    pub fn new(sample_rate: f64, data: Vec<f64>) -> CoreResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(CoreError::InvalidSampleRate(sample_rate));
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidParameters(format!(
                "sample {index} is not finite"
            )));
        }
        Ok(Self { sample_rate, data })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Same sample rate, new samples. Used by transforms to produce their output.
    pub(crate) fn with_data(&self, data: Vec<f64>) -> Self {
        Self {
            sample_rate: self.sample_rate,
            data,
        }
    }

    pub(crate) fn ensure_not_empty(&self) -> CoreResult<()> {
        if self.data.is_empty() {
            Err(CoreError::EmptySignal)
        } else {
            Ok(())
        }
    }
}

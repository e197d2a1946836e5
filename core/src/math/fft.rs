use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that keeps a matched forward/inverse plan pair for one length.
pub struct FftHelper {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        Self {
            forward,
            inverse,
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Spectrum of a real sequence, zero-padded or truncated to the plan length.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::zero());

        self.forward.process(&mut buffer);
        buffer
    }

    /// Real part of the normalized inverse transform.
    pub fn inverse(&self, mut spectrum: Vec<Complex64>) -> Vec<f64> {
        spectrum.resize(self.size, Complex64::zero());
        self.inverse.process(&mut spectrum);

        let scale = if self.size > 0 {
            1.0 / self.size as f64
        } else {
            0.0
        };
        spectrum.iter().map(|c| c.re * scale).collect()
    }

    /// Absolute frequency of a bin for the given sample rate, folding the
    /// upper half of the spectrum onto its negative-frequency mirror.
    pub fn bin_frequency(&self, bin: usize, sample_rate: f64) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        let folded = if bin <= self.size / 2 {
            bin
        } else {
            self.size - bin
        };
        folded as f64 * sample_rate / self.size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_helper_returns_same_length() {
        let helper = FftHelper::new(4);
        let output = helper.forward(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn inverse_restores_input() {
        let helper = FftHelper::new(5);
        let input = [0.5, -1.0, 2.0, 0.25, 3.0];
        let restored = helper.inverse(helper.forward(&input));
        for (a, b) in input.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn bin_frequency_folds_negative_half() {
        let helper = FftHelper::new(8);
        assert_eq!(helper.bin_frequency(0, 80.0), 0.0);
        assert_eq!(helper.bin_frequency(1, 80.0), 10.0);
        assert_eq!(helper.bin_frequency(4, 80.0), 40.0);
        assert_eq!(helper.bin_frequency(7, 80.0), 10.0);
    }
}

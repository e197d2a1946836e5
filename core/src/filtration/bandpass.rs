use crate::filtration::params::Range;
use crate::math::fft::FftHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{CoreResult, Filtration};
use crate::signal::Signal;
use crate::telemetry::log::LogManager;
use num_complex::Complex64;

/// Zero-phase band-pass filter.
///
/// The whole record is transformed at once and every spectral bin whose
/// absolute frequency falls outside the range is cleared before the inverse
/// transform. No phase is applied to the kept bins, so arrivals stay aligned
/// with the input.
pub struct BandPassFilter {
    range: Range,
    logger: LogManager,
}

impl BandPassFilter {
    pub fn new(range: Range) -> Self {
        Self {
            range,
            logger: LogManager::new("bandpass"),
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }
}

impl Filtration for BandPassFilter {
    fn name(&self) -> &'static str {
        "bandpass"
    }

    fn run(&self, signal: &Signal) -> CoreResult<Signal> {
        signal.ensure_not_empty()?;
        self.range.check_nyquist(signal.sample_rate())?;

        let fft = FftHelper::new(signal.len());
        let mut spectrum = fft.forward(signal.data());
        let mut kept = 0usize;
        for (bin, value) in spectrum.iter_mut().enumerate() {
            if self
                .range
                .contains(fft.bin_frequency(bin, signal.sample_rate()))
            {
                kept += 1;
            } else {
                *value = Complex64::new(0.0, 0.0);
            }
        }

        let filtered = fft.inverse(spectrum);
        self.logger.record(&format!(
            "[{:.3}, {:.3}] Hz kept {}/{} bins, RMS {:.4} -> {:.4}",
            self.range.min(),
            self.range.max(),
            kept,
            fft.size(),
            StatsHelper::rms(signal.data()),
            StatsHelper::rms(&filtered)
        ));

        Ok(signal.with_data(filtered))
    }
}

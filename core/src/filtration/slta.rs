use crate::filtration::params::SltaParameters;
use crate::prelude::{CoreResult, Filtration};
use crate::signal::Signal;
use crate::telemetry::log::LogManager;

/// STA/LTA onset detector.
///
/// Sample `i` of the output is `(STA_i / LTA_i) ^ rank`, where STA and LTA are
/// the mean squared amplitude over the trailing short and long windows ending
/// at `i` (inclusive). Before a window has a full history it is padded with
/// the energy of the first sample, so the output is as long as the input and
/// a stationary record starts at a ratio of one. A silent long window yields
/// `0`. Ratios whose power exceeds `f64::MAX` saturate at `f64::MAX`.
pub struct StaLtaDetector {
    parameters: SltaParameters,
    logger: LogManager,
}

impl StaLtaDetector {
    pub fn new(parameters: SltaParameters) -> Self {
        Self {
            parameters,
            logger: LogManager::new("slta"),
        }
    }

    pub fn parameters(&self) -> SltaParameters {
        self.parameters
    }
}

/// Trailing-window energy sums for one window length.
///
/// Samples are split into blocks of the window length. Every full window
/// spans at most two neighbouring blocks, so its sum is the tail of one block
/// plus the head of the next. Both partial sums only accumulate samples that
/// lie inside the window, which keeps rounding relative to the window's own
/// energy and makes an all-zero window sum to exactly zero.
struct EnergyWindows {
    len: usize,
    /// Sum from the start of the sample's block up to the sample.
    head: Vec<f64>,
    /// Sum from the sample to the end of its block.
    tail: Vec<f64>,
    padding: f64,
}

impl EnergyWindows {
    fn new(samples: &[f64], len: usize) -> Self {
        let energy: Vec<f64> = samples.iter().map(|v| v * v).collect();
        let mut head = vec![0.0; energy.len()];
        let mut tail = vec![0.0; energy.len()];
        for (block_start, block) in (0..).step_by(len).zip(energy.chunks(len)) {
            let mut running = 0.0;
            for (offset, &value) in block.iter().enumerate() {
                running += value;
                head[block_start + offset] = running;
            }
            running = 0.0;
            for (offset, &value) in block.iter().enumerate().rev() {
                running += value;
                tail[block_start + offset] = running;
            }
        }
        Self {
            len,
            head,
            tail,
            padding: energy.first().copied().unwrap_or(0.0),
        }
    }

    /// Mean energy of the window ending at `end`.
    fn mean(&self, end: usize) -> f64 {
        let sum = if end + 1 < self.len {
            self.head[end] + (self.len - end - 1) as f64 * self.padding
        } else {
            let start = end + 1 - self.len;
            if start % self.len == 0 {
                self.head[end]
            } else {
                self.tail[start] + self.head[end]
            }
        };
        sum / self.len as f64
    }
}

impl Filtration for StaLtaDetector {
    fn name(&self) -> &'static str {
        "slta"
    }

    fn run(&self, signal: &Signal) -> CoreResult<Signal> {
        signal.ensure_not_empty()?;
        let (short_len, long_len) = self.parameters.window_samples(signal.sample_rate())?;
        let rank = self.parameters.rank();

        let short = EnergyWindows::new(signal.data(), short_len);
        let long = EnergyWindows::new(signal.data(), long_len);
        let ratios: Vec<f64> = (0..signal.len())
            .map(|idx| {
                let lta = long.mean(idx);
                if lta == 0.0 {
                    return 0.0;
                }
                (short.mean(idx) / lta).powf(rank).min(f64::MAX)
            })
            .collect();

        let peak = ratios.iter().copied().fold(0.0, f64::max);
        self.logger.record(&format!(
            "windows {}/{} samples, rank {}, peak ratio {:.4}",
            short_len, long_len, rank, peak
        ));

        Ok(signal.with_data(ratios))
    }
}

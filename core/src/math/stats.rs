pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        (Self::energy(samples) / samples.len() as f64).sqrt()
    }

    /// Sum of squared amplitudes.
    pub fn energy(samples: &[f64]) -> f64 {
        samples.iter().map(|&v| v * v).sum()
    }

    /// Median of ascending values; the mean of the two central values for an
    /// even count.
    pub(crate) fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
        let len = sorted.len();
        match len {
            0 => None,
            _ if len % 2 == 1 => Some(sorted[len / 2]),
            _ => Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0),
        }
    }
}

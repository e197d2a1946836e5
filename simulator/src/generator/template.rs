use std::f64::consts::PI;

/// Sum of sines sampled for `duration` seconds at `sample_rate` Hz.
///
/// Components are paired by position; surplus frequencies or amplitudes are
/// ignored.
pub fn sine_mixture(
    duration: f64,
    sample_rate: f64,
    frequencies: &[f64],
    amplitudes: &[f64],
) -> Vec<f64> {
    let count = (duration * sample_rate).round().max(0.0) as usize;
    (0..count)
        .map(|i| {
            let t = i as f64 / sample_rate;
            frequencies
                .iter()
                .zip(amplitudes)
                .map(|(&freq, &amp)| amp * (2.0 * PI * freq * t).sin())
                .sum()
        })
        .collect()
}

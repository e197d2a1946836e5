use crate::generator::template::sine_mixture;
use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use seismocore::fracture::{Event, EventCloud};
use seismocore::geometry::Coordinate;
use seismocore::Signal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for generating a synthetic survey: one waveform with a
/// burst onset and an event cloud spread along a fracture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sample_rate: f64,
    pub duration: f64,
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
    /// Time in seconds at which the burst starts.
    pub onset: f64,
    pub onset_amplitude: f64,
    pub onset_frequency: f64,
    /// Exponential decay rate of the burst envelope, per second.
    pub onset_decay: f64,
    pub noise: f64,
    pub seed: u64,
    pub event_count: usize,
    /// True fracture azimuth, clockwise from north, in radians.
    pub fracture_axis: f64,
    pub half_length: f64,
    pub scatter: f64,
    /// Share of events placed far outside the start area.
    pub background_ratio: f64,
    /// Quality scores are drawn uniformly from `[0, max_quality)`.
    pub max_quality: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000.0,
            duration: 10.0,
            frequencies: vec![1.0, 2.0, 3.0, 4.0],
            amplitudes: vec![2.0, 3.0, 4.0, 5.0],
            onset: 6.0,
            onset_amplitude: 40.0,
            onset_frequency: 25.0,
            onset_decay: 3.0,
            noise: 0.05,
            seed: 0,
            event_count: 200,
            fracture_axis: PI / 3.0,
            half_length: 18.0,
            scatter: 1.5,
            background_ratio: 0.2,
            max_quality: 12.0,
        }
    }
}

/// Synthetic waveform plus event cloud.
#[derive(Debug, Clone)]
pub struct SyntheticSurvey {
    pub signal: Signal,
    pub cloud: EventCloud,
}

fn build_samples(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<f64> {
    let mut samples = sine_mixture(
        config.duration,
        config.sample_rate,
        &config.frequencies,
        &config.amplitudes,
    );
    for (idx, value) in samples.iter_mut().enumerate() {
        let t = idx as f64 / config.sample_rate;
        if t >= config.onset {
            let elapsed = t - config.onset;
            *value += config.onset_amplitude
                * (2.0 * PI * config.onset_frequency * elapsed).sin()
                * (-config.onset_decay * elapsed).exp();
        }
        if config.noise > 0.0 {
            *value += rng.gen_range(-config.noise..config.noise);
        }
    }
    samples
}

fn build_events(
    config: &GeneratorConfig,
    port_point: &Coordinate,
    rng: &mut StdRng,
) -> Vec<Event> {
    let (along_x, along_y) = (config.fracture_axis.sin(), config.fracture_axis.cos());
    let (across_x, across_y) = (along_y, -along_x);
    let spread = |rng: &mut StdRng, limit: f64| {
        if limit > 0.0 {
            rng.gen_range(-limit..limit)
        } else {
            0.0
        }
    };
    let background_ratio = if config.background_ratio.is_finite() {
        config.background_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };

    (0..config.event_count)
        .map(|_| {
            let quality = spread(rng, config.max_quality).abs();
            if rng.gen_bool(background_ratio) {
                let bearing = rng.gen_range(0.0..2.0 * PI);
                let distance = rng.gen_range(3.0..6.0) * config.half_length.max(1.0);
                let location = Coordinate::new(
                    port_point.x + distance * bearing.sin(),
                    port_point.y + distance * bearing.cos(),
                    port_point.altitude + spread(rng, config.scatter),
                );
                return Event::new(location, quality);
            }
            let along = spread(rng, config.half_length);
            let across = spread(rng, config.scatter);
            let location = Coordinate::new(
                port_point.x + along * along_x + across * across_x,
                port_point.y + along * along_y + across * across_y,
                port_point.altitude + spread(rng, config.scatter),
            );
            Event::new(location, quality)
        })
        .collect()
}

pub fn build_survey(
    config: &GeneratorConfig,
    port_point: &Coordinate,
) -> anyhow::Result<SyntheticSurvey> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = build_samples(config, &mut rng);
    let signal = Signal::new(config.sample_rate, samples)
        .with_context(|| format!("building synthetic signal at {} Hz", config.sample_rate))?;
    let cloud = EventCloud::new(build_events(config, port_point, &mut rng));
    Ok(SyntheticSurvey { signal, cloud })
}

use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use seismocore::filtration::{Range, SltaParameters};
use seismocore::geometry::Coordinate;
use seismocore::interface::{RangePayload, SltaPayload};
use seismocore::TracerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub band: RangePayload,
    pub slta: SltaPayload,
    pub port_point: Coordinate,
    #[serde(default)]
    pub tracer: TracerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(band: (f64, f64), slta: (f64, f64, f64), radius: f64, seed: u64) -> Self {
        Self {
            band: RangePayload {
                min: band.0,
                max: band.1,
            },
            slta: SltaPayload {
                short_window: slta.0,
                long_window: slta.1,
                rank: slta.2,
            },
            port_point: Coordinate::new(0.0, 0.0, -2000.0),
            tracer: TracerConfig {
                radius,
                ..TracerConfig::default()
            },
            generator: GeneratorConfig {
                seed,
                ..GeneratorConfig::default()
            },
        }
    }

    pub fn range(&self) -> anyhow::Result<Range> {
        Range::try_from(self.band).context("validating band-pass range")
    }

    pub fn slta_parameters(&self) -> anyhow::Result<SltaParameters> {
        SltaParameters::try_from(self.slta).context("validating STA/LTA parameters")
    }
}

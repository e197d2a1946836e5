use crate::generator::profile::SyntheticSurvey;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::warn;
use seismocore::filtration::{BandPassFilter, StaLtaDetector};
use seismocore::fracture::FractureAzimuthTracer;
use seismocore::interface::ErrorPayload;
use seismocore::math::StatsHelper;
use seismocore::telemetry::MetricsRecorder;
use seismocore::Filtration;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub filtered_rms: f64,
    pub slta_peak: f64,
    /// Seconds from the start of the record to the STA/LTA peak.
    pub slta_peak_time: f64,
    pub event_count: usize,
    pub admitted: Vec<usize>,
    pub azimuth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth_error: Option<ErrorPayload>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn execute(&self, survey: &SyntheticSurvey) -> anyhow::Result<WorkflowResult> {
        let bandpass = BandPassFilter::new(self.config.range()?);
        let filtered = bandpass.run(&survey.signal);
        self.metrics.record_outcome(&filtered);
        let filtered =
            filtered.with_context(|| format!("executing {} filtration", bandpass.name()))?;

        let detector = StaLtaDetector::new(self.config.slta_parameters()?);
        let ratios = detector.run(&filtered);
        self.metrics.record_outcome(&ratios);
        let ratios =
            ratios.with_context(|| format!("executing {} filtration", detector.name()))?;

        let (peak_index, slta_peak) = ratios
            .data()
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (idx, value)| {
                if value > best.1 {
                    (idx, value)
                } else {
                    best
                }
            });

        let tracer = FractureAzimuthTracer::new(
            survey.cloud.clone(),
            self.config.port_point,
            self.config.tracer,
        )
        .context("building fracture tracer")?;
        let admitted: Vec<usize> = tracer.admitted_events().collect();
        let azimuth = tracer.median_azimuth();
        self.metrics.record_outcome(&azimuth);
        if let Err(err) = &azimuth {
            warn!("fracture azimuth unavailable: {err}");
        }

        Ok(WorkflowResult {
            filtered_rms: StatsHelper::rms(filtered.data()),
            slta_peak,
            slta_peak_time: peak_index as f64 / ratios.sample_rate(),
            event_count: survey.cloud.len(),
            admitted,
            azimuth: azimuth.as_ref().ok().copied(),
            azimuth_error: azimuth.as_ref().err().map(ErrorPayload::from),
        })
    }
}

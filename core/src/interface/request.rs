use crate::filtration::{BandPassFilter, Range, SltaParameters, StaLtaDetector};
use crate::fracture::{Event, EventCloud, FractureAzimuthTracer};
use crate::geometry::{Coordinate, VectorDirection};
use crate::interface::envelope::Response;
use crate::prelude::{CoreError, CoreResult, Filtration, TracerConfig};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};

/// Waveform as sent over the wire; `frequency` is the sample rate in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    pub frequency: f64,
    pub data: Vec<f64>,
}

impl TryFrom<SignalPayload> for Signal {
    type Error = CoreError;

    fn try_from(payload: SignalPayload) -> CoreResult<Self> {
        Signal::new(payload.frequency, payload.data)
    }
}

impl From<Signal> for SignalPayload {
    fn from(signal: Signal) -> Self {
        Self {
            frequency: signal.sample_rate(),
            data: signal.into_data(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePayload {
    #[serde(alias = "min_")]
    pub min: f64,
    #[serde(alias = "max_")]
    pub max: f64,
}

impl TryFrom<RangePayload> for Range {
    type Error = CoreError;

    fn try_from(payload: RangePayload) -> CoreResult<Self> {
        Range::new(payload.min, payload.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SltaPayload {
    pub short_window: f64,
    pub long_window: f64,
    pub rank: f64,
}

impl TryFrom<SltaPayload> for SltaParameters {
    type Error = CoreError;

    fn try_from(payload: SltaPayload) -> CoreResult<Self> {
        SltaParameters::new(payload.short_window, payload.long_window, payload.rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionPayload {
    pub azimuth: f64,
    pub inclination: f64,
}

impl TryFrom<DirectionPayload> for VectorDirection {
    type Error = CoreError;

    fn try_from(payload: DirectionPayload) -> CoreResult<Self> {
        VectorDirection::new(payload.azimuth, payload.inclination)
    }
}

fn run_filtration<F: Filtration>(
    filtration: &F,
    signal: SignalPayload,
) -> CoreResult<Response<SignalPayload>> {
    let signal = Signal::try_from(signal)?;
    let output = filtration.run(&signal)?;
    Ok(Response::single(SignalPayload::from(output)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandpassRequest {
    pub signal: SignalPayload,
    pub frequency_range: RangePayload,
}

impl BandpassRequest {
    pub fn run(self) -> CoreResult<Response<SignalPayload>> {
        let filter = BandPassFilter::new(Range::try_from(self.frequency_range)?);
        run_filtration(&filter, self.signal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SltaRequest {
    pub signal: SignalPayload,
    pub parameters: SltaPayload,
}

impl SltaRequest {
    pub fn run(self) -> CoreResult<Response<SignalPayload>> {
        let detector = StaLtaDetector::new(SltaParameters::try_from(self.parameters)?);
        run_filtration(&detector, self.signal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRequest {
    pub events: Vec<Event>,
    pub port_point: Coordinate,
    #[serde(default)]
    pub config: TracerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well: Option<DirectionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub admitted: Vec<usize>,
    pub azimuth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_azimuth: Option<f64>,
}

impl TraceRequest {
    pub fn into_tracer(self) -> CoreResult<FractureAzimuthTracer> {
        let tracer = FractureAzimuthTracer::new(
            EventCloud::new(self.events),
            self.port_point,
            self.config,
        )?;
        match self.well {
            Some(well) => Ok(tracer.with_well(VectorDirection::try_from(well)?)),
            None => Ok(tracer),
        }
    }

    pub fn run(self) -> CoreResult<Response<TraceSummary>> {
        let tracer = self.into_tracer()?;
        let summary = TraceSummary {
            admitted: tracer.admitted_events().collect(),
            azimuth: tracer.median_azimuth()?,
            relative_azimuth: tracer.relative_azimuth().transpose()?,
        };
        Ok(Response::single(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angles::circular_distance;
    use std::f64::consts::PI;

    #[test]
    fn bandpass_request_accepts_legacy_range_keys() {
        let json = r#"{
            "signal": {"frequency": 8.0, "data": [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0]},
            "frequency_range": {"min_": 1.5, "max_": 2.5}
        }"#;
        let request: BandpassRequest = serde_json::from_str(json).unwrap();
        let response = request.run().unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].frequency, 8.0);
        for (got, want) in response.data[0]
            .data
            .iter()
            .zip([1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0])
        {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn slta_request_reports_invalid_parameters() {
        let request = SltaRequest {
            signal: SignalPayload {
                frequency: 100.0,
                data: vec![1.0; 10],
            },
            parameters: SltaPayload {
                short_window: 1.0,
                long_window: 0.5,
                rank: 1.0,
            },
        };
        assert!(matches!(
            request.run(),
            Err(CoreError::InvalidParameters(_))
        ));
    }

    #[test]
    fn trace_request_defaults_config_and_reports_relative_azimuth() {
        let json = r#"{
            "events": [
                {"location": {"x": 0.0, "y": 15.0, "altitude": -10.0}, "quality": 1.0},
                {"location": {"x": 0.0, "y": 5.0, "altitude": -10.0}, "quality": 1.0},
                {"location": {"x": 0.0, "y": 19.0, "altitude": -10.0}, "quality": 50.0}
            ],
            "port_point": {"x": 0.0, "y": 10.0, "altitude": -10.0},
            "well": {"azimuth": 1.0, "inclination": 0.0}
        }"#;
        let request: TraceRequest = serde_json::from_str(json).unwrap();
        let response = request.run().unwrap();
        let summary = &response.data[0];
        assert_eq!(summary.admitted, vec![0, 1]);
        assert!(circular_distance(summary.azimuth, 0.0, PI) < 1e-12);
        let relative = summary.relative_azimuth.unwrap();
        assert!((relative - (PI - 1.0)).abs() < 1e-9);
    }
}

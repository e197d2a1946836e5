//! Serializable payloads exchanged with the transport layer.
//!
//! Payloads carry raw caller input; converting them into core types runs the
//! same validation as the core constructors.

pub mod envelope;
pub mod request;

pub use envelope::{ErrorPayload, Response};
pub use request::{
    BandpassRequest, DirectionPayload, RangePayload, SignalPayload, SltaPayload, SltaRequest,
    TraceRequest, TraceSummary,
};

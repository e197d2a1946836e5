use crate::prelude::CoreError;
use serde::{Deserialize, Serialize};

/// Response envelope: the transport layer always answers with a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: Vec<T>,
}

impl<T: Serialize> Response<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn single(item: T) -> Self {
        Self { data: vec![item] }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Machine-readable form of a [`CoreError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

impl From<&CoreError> for ErrorPayload {
    fn from(err: &CoreError) -> Self {
        let kind = match err {
            CoreError::InvalidRange(_) => "invalid_range",
            CoreError::EmptySignal => "empty_signal",
            CoreError::InvalidSampleRate(_) => "invalid_sample_rate",
            CoreError::InvalidParameters(_) => "invalid_parameters",
            CoreError::InvalidRadius(_) => "invalid_radius",
            CoreError::InvalidDirection(_) => "invalid_direction",
            CoreError::MalformedCloud(_) => "malformed_cloud",
            CoreError::NoEventsInRange => "no_events_in_range",
        };
        Self {
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }
}

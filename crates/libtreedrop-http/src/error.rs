//! Mapping of transport failures onto backend errors

use libtreedrop_core::BackendError;

/// Classify a reqwest failure
pub(crate) fn from_reqwest(err: reqwest::Error) -> BackendError {
    if err.is_decode() {
        BackendError::Decode(err.to_string())
    } else if err.is_timeout() {
        BackendError::Request(format!("timed out: {}", err))
    } else {
        BackendError::Request(err.to_string())
    }
}

//! Error types shared across the crate.

use thiserror::Error;

use crate::track::BackendKind;

/// Failures raised at the backend adapter boundary.
///
/// The controller turns every one of these into a single user-visible
/// notice; none of them crosses into playlist bookkeeping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("could not start {kind} playback: {reason}")]
    Init { kind: BackendKind, reason: String },
    #[error("playback failed: {0}")]
    Runtime(String),
    #[error("{0} player is not available")]
    Unavailable(BackendKind),
    #[error("{0} player did not become ready in time")]
    Timeout(BackendKind),
}

impl BackendError {
    pub fn init(kind: BackendKind, reason: impl Into<String>) -> Self {
        Self::Init {
            kind,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track {title:?} has no playable source")]
    Unplayable { title: String },
    #[error("invalid playlist file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not read playlist file: {0}")]
    Io(#[from] std::io::Error),
}

// MIT License - Copyright (c) 2026 Peter Wright

use crate::devices::sensor::SensorType;

/// All errors that can occur in the catpoint library.
///
/// The controller itself never produces these; they come from its
/// collaborators (store, classifier) and are propagated unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sensor already exists: {name} ({sensor_type})")]
    DuplicateSensor { name: String, sensor_type: SensorType },

    #[error("Unknown sensor: {name} ({sensor_type})")]
    UnknownSensor { name: String, sensor_type: SensorType },

    #[error("Image classification failed: {reason}")]
    Classifier { reason: String },

    #[error("Store failure: {reason}")]
    Store { reason: String },
}

impl SecurityError {
    /// Whether this error is transient and the operation could be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SecurityError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, SecurityError>;

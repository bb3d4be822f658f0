use thiserror::Error;

/// Errors raised by telemetry sinks
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode record: {0}")]
    Encode(String),
}

pub type TelemetryResult<T> = std::result::Result<T, TelemetryError>;

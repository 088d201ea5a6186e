//! Error types for the Diode SDK

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiodeError>;

#[derive(Debug, Error)]
pub enum DiodeError {
    /// Missing or unusable client configuration (API key, reporting DSN).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target string is not a recognized diode endpoint.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// gRPC transport error while setting up the endpoint.
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The ingest call was rejected by the service or failed in flight.
    #[error("Ingestion failed with status {code:?}: {message}")]
    Client { code: tonic::Code, message: String },

    /// The client was used after `close()`.
    #[error("Client is closed")]
    Closed,
}

impl From<tonic::Status> for DiodeError {
    fn from(status: tonic::Status) -> Self {
        DiodeError::Client {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

impl DiodeError {
    /// Transport status code, for [`DiodeError::Client`] errors.
    pub fn status_code(&self) -> Option<tonic::Code> {
        match self {
            DiodeError::Client { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Transport status message, for [`DiodeError::Client`] errors.
    pub fn details(&self) -> Option<&str> {
        match self {
            DiodeError::Client { message, .. } => Some(message),
            _ => None,
        }
    }
}

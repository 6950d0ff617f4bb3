use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    ConfigError(String),
    ValidationError(String),
    RequestError(String),
    TransportError(String),
    StreamProtocolError(String),
    DeviceError(String),
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StudioError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StudioError::RequestError(msg) => write!(f, "Request error: {}", msg),
            StudioError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            StudioError::StreamProtocolError(msg) => write!(f, "Stream protocol error: {}", msg),
            StudioError::DeviceError(msg) => write!(f, "Device error: {}", msg),
        }
    }
}

impl std::error::Error for StudioError {}

pub type Result<T> = std::result::Result<T, StudioError>;

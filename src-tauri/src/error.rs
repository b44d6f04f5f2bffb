use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowdeskError {
    /// Registration input rejected, locally or by the backend.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a token the backend no longer accepts.
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Upload(String),

    /// Backend unreachable, timed out, or sent an unreadable body.
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Report(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl FlowdeskError {
    /// Stable tag sent to the frontend alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowdeskError::Validation(_) => "validation",
            FlowdeskError::Auth(_) => "auth",
            FlowdeskError::Upload(_) => "upload",
            FlowdeskError::Network(_) => "network",
            FlowdeskError::Report(_) => "report",
            FlowdeskError::Session(_) => "session",
            FlowdeskError::Config(_) => "config",
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, FlowdeskError::Auth(_))
    }
}

impl Serialize for FlowdeskError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FlowdeskError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<FlowdeskError> for String {
    fn from(err: FlowdeskError) -> Self {
        err.to_string()
    }
}

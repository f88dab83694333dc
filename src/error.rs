use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Name of the upstream provider as it appears in user-facing messages.
pub const PROVIDER_NAME: &str = "Gemini";

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Image data is required.")]
    InvalidInput,

    #[error("Missing {name} in environment.")]
    ConfigurationMissing { name: String },

    #[error("Gemini returned empty result. Check your prompt or try a different image.")]
    EmptyUpstreamReply,

    #[error("Failed to parse Gemini result. Raw output: {raw}")]
    UnparsableUpstreamReply { raw: String },

    #[error("Gemini result did not match the diagnosis schema: {reason}")]
    SchemaViolation { reason: String, raw: String },

    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification surfaced to callers of the diagnosis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    ConfigurationMissing,
    EmptyUpstreamReply,
    UnparsableUpstreamReply,
    SchemaViolation,
    InternalFailure,
}

impl Error {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn configuration_missing(name: impl Into<String>) -> Self {
        Self::ConfigurationMissing { name: name.into() }
    }

    pub fn unparsable(raw: impl Into<String>) -> Self {
        Self::UnparsableUpstreamReply { raw: raw.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::InvalidInput,
            Self::ConfigurationMissing { .. } => ErrorKind::ConfigurationMissing,
            Self::EmptyUpstreamReply => ErrorKind::EmptyUpstreamReply,
            Self::UnparsableUpstreamReply { .. } => ErrorKind::UnparsableUpstreamReply,
            Self::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Self::Upstream { .. }
            | Self::Serialization(_)
            | Self::Yaml(_)
            | Self::Io(_)
            | Self::Network(_)
            | Self::AddrParse(_)
            | Self::Internal(_) => ErrorKind::InternalFailure,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the end user.
    ///
    /// Internal failures collapse to a generic message; their detail only goes
    /// to the log. The raw upstream text is echoed for unparsable replies unless
    /// `expose_raw` is off.
    pub fn public_message(&self, expose_raw: bool) -> String {
        match self.kind() {
            ErrorKind::InternalFailure => INTERNAL_ERROR_MESSAGE.to_string(),
            ErrorKind::UnparsableUpstreamReply if !expose_raw => {
                format!("Failed to parse {} result.", PROVIDER_NAME)
            }
            _ => self.to_string(),
        }
    }
}

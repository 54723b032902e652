use thiserror::Error;

/// Coarse classification of every error this crate returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network/TLS failure, non-200 status or a body that is not JSON
    Transport,
    /// The exchange answered with `"status": "error"`
    Domain,
    /// Credentials are missing or unusable; nothing was sent
    Credential,
    /// A local precondition failed before submission
    Validation,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {reason}")]
    ApiError { reason: String, code: String },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl From<crate::core::types::TypesError> for ExchangeError {
    fn from(err: crate::core::types::TypesError) -> Self {
        Self::InvalidParameters(err.to_string())
    }
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HttpError(_) | Self::HttpStatus { .. } | Self::JsonError(_) | Self::NetworkError(_) => {
                ErrorKind::Transport
            }
            Self::ApiError { .. } => ErrorKind::Domain,
            Self::AuthError(_) | Self::ConfigError(_) => ErrorKind::Credential,
            Self::InvalidParameters(_) => ErrorKind::Validation,
        }
    }

    /// Exchange-defined error code, only present on domain errors
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ApiError { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status carried by a non-200 transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

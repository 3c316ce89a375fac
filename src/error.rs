#![allow(missing_docs)]
//! Error types for the Play Money client

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayMoneyErrorCode {
    NotFound,
    ApiError,
    AuthError,
    ValidationError,
    ParseError,
    NetworkError,
    ConfigError,
    InvalidArgument,
}

impl fmt::Display for PlayMoneyErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "NOT_FOUND",
            Self::ApiError => "API_ERROR",
            Self::AuthError => "AUTH_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InvalidArgument => "INVALID_ARGUMENT",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug)]
pub struct PlayMoneyError {
    pub code: PlayMoneyErrorCode,
    pub message: String,
    /// HTTP status of the failed response, when there was one.
    pub status: Option<u16>,
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PlayMoneyError {
    pub fn new(code: PlayMoneyErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            cause: None,
        }
    }

    pub fn with_cause(
        code: PlayMoneyErrorCode,
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            cause: Some(Box::new(cause)),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == PlayMoneyErrorCode::NotFound
    }
}

impl fmt::Display for PlayMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] ({status}) {}", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl PlayMoneyError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::NotFound, message)
    }

    pub fn api_error(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::ApiError, message)
    }

    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::AuthError, message)
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::ParseError, message)
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::NetworkError, message)
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::ConfigError, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(PlayMoneyErrorCode::InvalidArgument, message)
    }
}

/// A decoded resource that breaks one of the API's format or consistency rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid CUID '{0}': must start with 'c' followed by at least 8 non-whitespace, non-dash characters")]
    InvalidCuid(String),

    #[error("invalid color '{0}': must be a hex code like '#FFFFFF'")]
    InvalidColor(String),

    #[error("invalid emoji '{0}': must be in the format ':emoji_code:'")]
    InvalidEmoji(String),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("{earlier} ({earlier_value}) cannot be after {later} ({later_value})")]
    DateOrder {
        earlier: &'static str,
        earlier_value: String,
        later: &'static str,
        later_value: String,
    },

    #[error("{field} mismatch: expected {expected}, found {found}")]
    Mismatch {
        field: &'static str,
        expected: String,
        found: String,
    },

    #[error("missing {field}: {reason}")]
    Missing {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{0}")]
    Inconsistent(String),
}

impl From<SchemaError> for PlayMoneyError {
    fn from(err: SchemaError) -> Self {
        PlayMoneyError::with_cause(
            PlayMoneyErrorCode::ValidationError,
            format!("Response failed validation: {err}"),
            err,
        )
    }
}

pub type Result<T> = std::result::Result<T, PlayMoneyError>;

//! Error types shared by provider adapters.

use serde_json::Value;
use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Non-success response from the identity provider
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Identity provider returned {status_code}: {message}")]
pub struct IdentityProviderError {
    /// Human readable description supplied by the provider
    pub message: String,
    pub status_code: u16,
    /// The decoded response body
    pub body: Value,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    IdentityProvider(#[from] IdentityProviderError),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid payload: expected a JSON object")]
    InvalidPayload,

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Additional parameter overrides a reserved authorization parameter: {0}")]
    ReservedParameter(String),
}

impl IdentityError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Status code of the provider response, when this error came from one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::IdentityProvider(err) => Some(err.status_code),
            _ => None,
        }
    }
}

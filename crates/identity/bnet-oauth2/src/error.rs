//! Battle.net provider error types.

use thiserror::Error;

pub type BattleNetResult<T> = Result<T, BattleNetError>;

#[derive(Debug, Error)]
pub enum BattleNetError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Identity error: {0}")]
    Identity(#[from] bnet_oauth2_core::IdentityError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl BattleNetError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

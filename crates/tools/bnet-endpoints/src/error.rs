use bnet_oauth2::BattleNetError;
use thiserror::Error;

/// Errors that can occur while resolving endpoints
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    BattleNet(#[from] BattleNetError),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Both a client id and a redirect URI are needed to build an authorization URL")]
    IncompleteClient,
}

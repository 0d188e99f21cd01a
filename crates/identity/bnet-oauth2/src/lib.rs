//! Battle.net OAuth2 provider.
//!
//! Configures a generic OAuth2 engine for Blizzard's regional Battle.net
//! endpoints. The provider knows the authorize, token and user-info URLs for a
//! region, the per-game profile scope, how Battle.net reports errors, and how
//! to wrap the user-info payload into a [`BattleNetUser`]. Token exchange,
//! state handling and HTTP transport stay with the engine.
//!
//! ```
//! use bnet_oauth2::{BattleNetProvider, ClientCredentials, Region};
//!
//! let provider = BattleNetProvider::sc2(Region::Eu, ClientCredentials::default()).unwrap();
//! assert_eq!(provider.config().token_url(), "https://eu.battle.net/oauth/token");
//! ```

mod error;
mod provider;
mod provider_config;
mod settings;
mod user;


pub use error::{BattleNetError, BattleNetResult};
pub use provider::{BattleNetProvider, parse_error_response};
pub use provider_config::{
    ACCESS_TOKEN_RESOURCE_OWNER_ID, ClientCredentials, Game, ProviderConfig, Region,
    SCOPE_SEPARATOR,
};
pub use settings::BattleNetSettings;
pub use user::BattleNetUser;

// Re-export the engine contract for convenience
pub use bnet_oauth2_core::{
    AccessToken, AuthorizationRequest, IdentityError, IdentityProviderError, OAuth2ProviderAdapter,
    Payload, ResourceOwner, ResponseBody, VerifiedIdentity,
};

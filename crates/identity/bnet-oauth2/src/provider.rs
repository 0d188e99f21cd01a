//! Battle.net provider adapter.

use crate::error::BattleNetResult;
use crate::provider_config::{
    ACCESS_TOKEN_RESOURCE_OWNER_ID, ClientCredentials, Game, ProviderConfig, Region,
    SCOPE_SEPARATOR,
};
use crate::user::BattleNetUser;
use bnet_oauth2_core::{
    AccessToken, AuthorizationRequest, IdentityProviderError, IdentityResult,
    OAuth2ProviderAdapter, Payload, ResponseBody, authorization_request_url,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Reject any Battle.net response whose status is not 200.
///
/// The error carries the provider's `error_description`, the status code and
/// the decoded body.
pub fn parse_error_response(status_code: u16, body: ResponseBody) -> IdentityResult<()> {
    if status_code == 200 {
        return Ok(());
    }

    let body = body.decode();
    let message = ["error_description", "error"]
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .unwrap_or("unknown error")
        .to_string();

    Err(IdentityProviderError {
        message,
        status_code,
        body,
    }
    .into())
}

/// OAuth2 provider for one Battle.net game and region.
///
/// Use [`BattleNetProvider::sc2`] or [`BattleNetProvider::wow`]; the game is
/// fixed for the lifetime of the provider.
#[derive(Debug, Clone)]
pub struct BattleNetProvider {
    config: ProviderConfig,
    credentials: ClientCredentials,
}

impl BattleNetProvider {
    pub fn new(game: Game, region: Region, credentials: ClientCredentials) -> BattleNetResult<Self> {
        let config = ProviderConfig::new(game, region)?;
        Ok(Self::from_config(config, credentials))
    }

    /// StarCraft II provider
    pub fn sc2(region: Region, credentials: ClientCredentials) -> BattleNetResult<Self> {
        Self::new(Game::Sc2, region, credentials)
    }

    /// World of Warcraft provider
    pub fn wow(region: Region, credentials: ClientCredentials) -> BattleNetResult<Self> {
        Self::new(Game::Wow, region, credentials)
    }

    pub fn from_config(config: ProviderConfig, credentials: ClientCredentials) -> Self {
        debug!(
            "Configured Battle.net provider for game {} in region {}",
            config.game(),
            config.region()
        );

        Self {
            config,
            credentials,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn game(&self) -> Game {
        self.config.game()
    }

    pub fn region(&self) -> Region {
        self.config.region()
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Authorization request prefilled with this provider's client registration
    pub fn authorization_request(&self, state: impl Into<String>) -> AuthorizationRequest {
        AuthorizationRequest {
            client_id: self.credentials.client_id.clone(),
            redirect_uri: self.credentials.redirect_uri.clone(),
            state: state.into(),
            ..Default::default()
        }
    }

    /// Full authorization redirect URL for the given state
    pub fn authorization_redirect_url(&self, state: impl Into<String>) -> BattleNetResult<String> {
        let request = self.authorization_request(state);
        Ok(authorization_request_url(self, &request)?)
    }
}

impl OAuth2ProviderAdapter for BattleNetProvider {
    type Owner = BattleNetUser;

    fn authorization_url(&self) -> String {
        self.config.authorization_url()
    }

    fn token_url(&self) -> String {
        self.config.token_url()
    }

    fn user_info_url(&self, token: &AccessToken) -> String {
        self.config.user_info_url(token.token())
    }

    fn default_scopes(&self) -> Vec<String> {
        self.config.default_scopes()
    }

    fn scope_separator(&self) -> &str {
        SCOPE_SEPARATOR
    }

    fn access_token_resource_owner_id(&self) -> Option<&str> {
        Some(ACCESS_TOKEN_RESOURCE_OWNER_ID)
    }

    fn check_response(&self, status_code: u16, body: ResponseBody) -> IdentityResult<()> {
        parse_error_response(status_code, body).inspect_err(|e| {
            warn!(
                "Battle.net ({}) rejected request: {}",
                self.config.region(),
                e
            );
        })
    }

    fn create_resource_owner(
        &self,
        payload: Payload,
        _token: &AccessToken,
    ) -> IdentityResult<BattleNetUser> {
        let user = BattleNetUser::from_payload(payload, self.config.region());
        let id = user.id()?;

        debug!("Mapped Battle.net user {}", id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BattleNetError;
    use bnet_oauth2_core::IdentityError;
    use serde_json::json;
    use std::collections::HashMap;
    use url::Url;

    fn credentials() -> ClientCredentials {
        ClientCredentials::new("test_client_id", "test_secret", "http://localhost:3000/callback")
    }

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected a JSON object"),
        }
    }

    #[test]
    fn test_factories_fix_the_game() {
        let sc2 = BattleNetProvider::sc2(Region::Sea, credentials()).unwrap();
        assert_eq!(sc2.game(), Game::Sc2);
        assert_eq!(sc2.region(), Region::Sea);

        let wow = BattleNetProvider::wow(Region::Sea, credentials());
        assert!(matches!(wow, Err(BattleNetError::Configuration(_))));
    }

    #[test]
    fn test_adapter_endpoints() {
        let provider = BattleNetProvider::wow(Region::Tw, credentials()).unwrap();
        let token = AccessToken::new("abc123");

        assert_eq!(
            provider.authorization_url(),
            "https://tw.battle.net/oauth/authorize"
        );
        assert_eq!(provider.token_url(), "https://tw.battle.net/oauth/token");
        assert_eq!(
            provider.user_info_url(&token),
            "https://tw.battle.net/oauth/userinfo?access_token=abc123"
        );
        assert_eq!(provider.default_scopes(), vec!["wow.profile".to_string()]);
        assert_eq!(provider.scope_separator(), " ");
        assert_eq!(provider.access_token_resource_owner_id(), Some("accountId"));
    }

    #[test]
    fn test_error_response_with_description() {
        let result = parse_error_response(401, r#"{"error_description":"bad token"}"#.into());

        match result {
            Err(IdentityError::IdentityProvider(err)) => {
                assert_eq!(err.message, "bad token");
                assert_eq!(err.status_code, 401);
                assert_eq!(err.body, json!({ "error_description": "bad token" }));
            }
            other => panic!("Expected identity provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_with_structured_body() {
        let body = json!({ "error": "invalid_grant", "error_description": "Invalid code" });
        let result = parse_error_response(400, body.clone().into());

        match result {
            Err(IdentityError::IdentityProvider(err)) => {
                assert_eq!(err.message, "Invalid code");
                assert_eq!(err.body, body);
            }
            other => panic!("Expected identity provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_falls_back_to_error_code() {
        let result = parse_error_response(400, json!({ "error": "invalid_request" }).into());
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert!(err.to_string().ends_with("invalid_request"));
    }

    #[test]
    fn test_error_response_with_non_json_body() {
        let result = parse_error_response(502, "Bad Gateway".into());

        match result {
            Err(IdentityError::IdentityProvider(err)) => {
                assert_eq!(err.status_code, 502);
                assert_eq!(err.message, "unknown error");
                assert_eq!(err.body, Value::String("Bad Gateway".to_string()));
            }
            other => panic!("Expected identity provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_response_passes() {
        assert!(parse_error_response(200, "not even json".into()).is_ok());

        let provider = BattleNetProvider::sc2(Region::Us, credentials()).unwrap();
        assert!(
            provider
                .check_response(200, json!({ "error_description": "ignored" }).into())
                .is_ok()
        );
    }

    #[test]
    fn test_create_resource_owner() {
        let provider = BattleNetProvider::sc2(Region::Kr, credentials()).unwrap();
        let token = AccessToken::new("abc123");

        let user = provider
            .create_resource_owner(payload(json!({ "id": 42, "battletag": "Foo#1234" })), &token)
            .unwrap();
        assert_eq!(user.id().unwrap(), &json!(42));
        assert_eq!(user.region(), Region::Kr);
        assert_eq!(user.to_payload()["battletag"], "Foo#1234");

        let missing = provider
            .create_resource_owner(payload(json!({ "battletag": "Foo#1234" })), &token);
        assert!(matches!(missing, Err(IdentityError::MissingField(ref field)) if field == "id"));
    }

    #[test]
    fn test_authorization_redirect_url() {
        let provider = BattleNetProvider::sc2(Region::Eu, credentials()).unwrap();
        let url = Url::parse(&provider.authorization_redirect_url("state-1").unwrap()).unwrap();

        assert_eq!(url.host_str(), Some("eu.battle.net"));
        assert_eq!(url.path(), "/oauth/authorize");

        let params: HashMap<_, _> = url.query_pairs().collect();
        assert_eq!(params.get("client_id"), Some(&"test_client_id".into()));
        assert_eq!(params.get("state"), Some(&"state-1".into()));
        assert_eq!(params.get("scope"), Some(&"sc2.profile".into()));
        assert!(!params.contains_key("client_secret"));
    }
}

use crate::error::ToolError;
use bnet_oauth2::{AccessToken, BattleNetProvider, Game, OAuth2ProviderAdapter, Region};
use serde::Serialize;
use std::fmt::Write;
use uuid::Uuid;

/// Everything an engine needs to know about one provider
#[derive(Debug, Clone, Serialize)]
pub struct EndpointReport {
    pub game: Game,
    pub region: Region,
    pub authorization_url: String,
    pub token_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info_url: Option<String>,
    pub scopes: Vec<String>,
    /// Scopes as sent on the wire
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_request_url: Option<String>,
}

impl EndpointReport {
    pub fn new(
        provider: &BattleNetProvider,
        token: Option<&str>,
        state: Option<String>,
    ) -> Result<Self, ToolError> {
        let credentials = provider.credentials();
        let authorization_request_url = match (
            credentials.client_id.is_empty(),
            credentials.redirect_uri.is_empty(),
        ) {
            (true, true) => None,
            (false, false) => {
                let state = state.unwrap_or_else(|| Uuid::new_v4().to_string());
                Some(provider.authorization_redirect_url(state)?)
            }
            _ => return Err(ToolError::IncompleteClient),
        };

        let scopes = provider.default_scopes();
        let scope = scopes.join(provider.scope_separator());

        Ok(Self {
            game: provider.game(),
            region: provider.region(),
            authorization_url: provider.authorization_url(),
            token_url: provider.token_url(),
            user_info_url: token.map(|token| provider.user_info_url(&AccessToken::new(token))),
            scopes,
            scope,
            authorization_request_url,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "game:       {}", self.game);
        let _ = writeln!(out, "region:     {}", self.region);
        let _ = writeln!(out, "authorize:  {}", self.authorization_url);
        let _ = writeln!(out, "token:      {}", self.token_url);
        if let Some(url) = &self.user_info_url {
            let _ = writeln!(out, "userinfo:   {}", url);
        }
        let _ = writeln!(out, "scope:      {}", self.scope);
        if let Some(url) = &self.authorization_request_url {
            let _ = writeln!(out, "login url:  {}", url);
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bnet_oauth2::ClientCredentials;

    #[test]
    fn test_report_without_client() {
        let provider = BattleNetProvider::wow(Region::Cn, ClientCredentials::default()).unwrap();
        let report = EndpointReport::new(&provider, None, None).unwrap();

        assert_eq!(report.authorization_url, "https://cn.battle.net/oauth/authorize");
        assert_eq!(report.scope, "wow.profile");
        assert!(report.user_info_url.is_none());
        assert!(report.authorization_request_url.is_none());
        assert!(!report.to_text().contains("login url"));
    }

    #[test]
    fn test_report_with_partial_client_is_rejected() {
        let credentials = ClientCredentials::new("id", "", "");
        let provider = BattleNetProvider::sc2(Region::Us, credentials).unwrap();

        let result = EndpointReport::new(&provider, None, None);
        assert!(matches!(result, Err(ToolError::IncompleteClient)));
    }

    #[test]
    fn test_report_generates_state() {
        let credentials = ClientCredentials::new("id", "", "http://localhost/cb");
        let provider = BattleNetProvider::sc2(Region::Us, credentials).unwrap();

        let report = EndpointReport::new(&provider, Some("tok"), None).unwrap();
        let url = report.authorization_request_url.unwrap();
        assert!(url.starts_with("https://us.battle.net/oauth/authorize?response_type=code"));
        assert!(url.contains("state="));
        assert_eq!(
            report.user_info_url.as_deref(),
            Some("https://us.battle.net/oauth/userinfo?access_token=tok")
        );
    }
}

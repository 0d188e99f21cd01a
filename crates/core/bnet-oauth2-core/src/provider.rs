//! Traits a provider adapter implements for the engine.

use crate::error::{IdentityError, IdentityResult};
use crate::types::{AccessToken, AuthorizationRequest, Payload, ResponseBody};
use serde_json::Value;
use url::Url;

/// Separator used to join scopes unless a provider says otherwise
pub const DEFAULT_SCOPE_SEPARATOR: &str = " ";

/// Query parameters `authorization_request_url` sets itself
const RESERVED_PARAMS: [&str; 5] = [
    "response_type",
    "client_id",
    "redirect_uri",
    "state",
    "scope",
];

/// Authenticated account as returned by a provider's user-info endpoint
pub trait ResourceOwner: Send + Sync {
    /// Stable identifier of the account
    fn id(&self) -> IdentityResult<&Value>;

    /// The full payload the provider returned
    fn to_payload(&self) -> &Payload;
}

/// Provider-specific knowledge an OAuth2 engine needs to run the
/// authorization-code flow against one identity provider.
pub trait OAuth2ProviderAdapter: Send + Sync {
    type Owner: ResourceOwner;

    /// Base URL the user agent is redirected to
    fn authorization_url(&self) -> String;

    /// URL the authorization code is exchanged at
    fn token_url(&self) -> String;

    /// URL the resource owner details are fetched from
    fn user_info_url(&self, token: &AccessToken) -> String;

    fn default_scopes(&self) -> Vec<String>;

    fn scope_separator(&self) -> &str {
        DEFAULT_SCOPE_SEPARATOR
    }

    /// Token response field holding the resource owner id, if the provider sends one
    fn access_token_resource_owner_id(&self) -> Option<&str> {
        None
    }

    /// Inspect every provider response before the engine trusts it.
    fn check_response(&self, status_code: u16, body: ResponseBody) -> IdentityResult<()>;

    /// Map the user-info payload into the provider's resource owner.
    fn create_resource_owner(
        &self,
        payload: Payload,
        token: &AccessToken,
    ) -> IdentityResult<Self::Owner>;
}

/// Assemble the authorization redirect URL for `provider`.
///
/// Requested scopes fall back to the provider defaults and are joined with the
/// provider's scope separator. Additional parameters may not replace any of the
/// standard ones.
pub fn authorization_request_url<P>(
    provider: &P,
    request: &AuthorizationRequest,
) -> IdentityResult<String>
where
    P: OAuth2ProviderAdapter + ?Sized,
{
    if let Some(key) = request
        .additional_params
        .keys()
        .find(|key| RESERVED_PARAMS.contains(&key.as_str()))
    {
        return Err(IdentityError::ReservedParameter(key.clone()));
    }

    let mut url = Url::parse(&provider.authorization_url())?;

    let scopes = if request.scopes.is_empty() {
        provider.default_scopes()
    } else {
        request.scopes.clone()
    };

    {
        let mut params = url.query_pairs_mut();
        params.append_pair("response_type", "code");
        params.append_pair("client_id", &request.client_id);
        params.append_pair("redirect_uri", &request.redirect_uri);
        params.append_pair("state", &request.state);

        if !scopes.is_empty() {
            params.append_pair("scope", &scopes.join(provider.scope_separator()));
        }

        for (key, value) in &request.additional_params {
            params.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

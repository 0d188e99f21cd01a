//! OAuth2 protocol types exchanged between engines and provider adapters.

use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Raw key/value payload returned by a provider, in the order it was received
pub type Payload = serde_json::Map<String, Value>;

/// Body of a provider response as handed over by the engine.
///
/// Engines differ in whether they decode JSON before calling into the adapter,
/// so both shapes are accepted and resolved once with [`ResponseBody::decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Structured(Value),
    Raw(String),
}

impl ResponseBody {
    /// Resolve the body into JSON. Raw text that is not JSON is kept as a string value.
    pub fn decode(self) -> Value {
        match self {
            Self::Structured(value) => value,
            Self::Raw(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => Value::String(text),
            },
        }
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<Payload> for ResponseBody {
    fn from(payload: Payload) -> Self {
        Self::Structured(Value::Object(payload))
    }
}

impl From<String> for ResponseBody {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

/// Access token issued by the token endpoint
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    token: String,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    resource_owner_id: Option<Value>,
    /// Every other field of the token response
    values: Payload,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_in: None,
            refresh_token: None,
            resource_owner_id: None,
            values: Payload::new(),
        }
    }

    /// Build a token from a decoded token endpoint response.
    ///
    /// `resource_owner_id_key` names the response field carrying the account
    /// identifier, for providers that return one alongside the token.
    pub fn from_token_response(
        mut response: Payload,
        resource_owner_id_key: Option<&str>,
    ) -> IdentityResult<Self> {
        let token = match response.remove("access_token") {
            Some(Value::String(token)) => token,
            _ => return Err(IdentityError::missing_field("access_token")),
        };

        let expires_in = response.remove("expires_in").and_then(|v| v.as_u64());
        let refresh_token = response
            .remove("refresh_token")
            .and_then(|v| v.as_str().map(String::from));
        let resource_owner_id = resource_owner_id_key.and_then(|key| response.get(key).cloned());

        Ok(Self {
            token,
            expires_in,
            refresh_token,
            resource_owner_id,
            values: response,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn resource_owner_id(&self) -> Option<&Value> {
        self.resource_owner_id.as_ref()
    }

    pub fn values(&self) -> &Payload {
        &self.values
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("resource_owner_id", &self.resource_owner_id)
            .finish_non_exhaustive()
    }
}

/// Parameters for the authorization redirect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub state: String,
    /// Requested scopes. Empty means the provider defaults.
    pub scopes: Vec<String>,
    pub additional_params: BTreeMap<String, String>,
}

/// Identity handed to the application once the flow completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub provider_id: String,
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub metadata: Option<Value>,
}

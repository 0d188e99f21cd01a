//! Provider adapter contract for OAuth2 client engines.
//!
//! An OAuth2 engine owns the authorization-code flow: state, PKCE, the HTTP
//! exchanges and token storage. A provider adapter only tells the engine where
//! the provider's endpoints live, which scopes to request, how to recognise an
//! error response and how to turn the user-info payload into a resource owner.
//! This crate defines that seam so adapters such as `bnet-oauth2` can plug into
//! any engine that speaks it.

mod error;
mod provider;
mod types;

pub use error::{IdentityError, IdentityProviderError, IdentityResult};
pub use provider::{
    DEFAULT_SCOPE_SEPARATOR, OAuth2ProviderAdapter, ResourceOwner, authorization_request_url,
};
pub use types::{AccessToken, AuthorizationRequest, Payload, ResponseBody, VerifiedIdentity};

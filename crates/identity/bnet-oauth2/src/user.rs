//! Battle.net account returned by the user-info endpoint.

use crate::provider_config::{Game, Region};
use bnet_oauth2_core::{IdentityError, IdentityResult, Payload, ResourceOwner, VerifiedIdentity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Battle.net resource owner.
///
/// Keeps the user-info payload exactly as received. Battle.net currently sends
/// `id`, `sub` and `battletag`, but no field other than `id` is relied upon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleNetUser {
    data: Payload,
    region: Region,
}

impl BattleNetUser {
    pub fn from_payload(data: Payload, region: Region) -> Self {
        Self { data, region }
    }

    pub fn from_value(value: Value, region: Region) -> IdentityResult<Self> {
        match value {
            Value::Object(data) => Ok(Self::from_payload(data, region)),
            _ => Err(IdentityError::InvalidPayload),
        }
    }

    pub fn id(&self) -> IdentityResult<&Value> {
        self.data
            .get("id")
            .ok_or_else(|| IdentityError::missing_field("id"))
    }

    pub fn battletag(&self) -> Option<&str> {
        self.data.get("battletag").and_then(Value::as_str)
    }

    /// Region the profile was fetched from
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn to_payload(&self) -> &Payload {
        &self.data
    }

    /// Convert into the identity handed to the application
    pub fn into_identity(self, game: Game) -> IdentityResult<VerifiedIdentity> {
        let subject = match self.id()? {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        };
        let display_name = self.battletag().map(String::from);

        let mut metadata = self.data;
        metadata
            .entry("region")
            .or_insert_with(|| Value::String(self.region.to_string()));

        Ok(VerifiedIdentity {
            provider_id: format!("battlenet:{game}"),
            subject,
            email: None,
            display_name,
            metadata: Some(Value::Object(metadata)),
        })
    }
}

impl ResourceOwner for BattleNetUser {
    fn id(&self) -> IdentityResult<&Value> {
        BattleNetUser::id(self)
    }

    fn to_payload(&self) -> &Payload {
        BattleNetUser::to_payload(self)
    }
}

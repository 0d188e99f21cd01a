//! Game and region selection and the endpoints derived from them.

use crate::error::{BattleNetError, BattleNetResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Scopes are sent space separated
pub const SCOPE_SEPARATOR: &str = " ";

/// Token response field Battle.net uses for the account id
pub const ACCESS_TOKEN_RESOURCE_OWNER_ID: &str = "accountId";

const DOMAIN: &str = "battle.net";

/// Game whose profile scope is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Sc2,
    Wow,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::Sc2, Game::Wow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Sc2 => "sc2",
            Game::Wow => "wow",
        }
    }

    pub fn profile_scope(&self) -> String {
        format!("{}.profile", self.as_str())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = BattleNetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|game| game.as_str() == s)
            .ok_or_else(|| {
                BattleNetError::configuration(format!(
                    "Game must be either sc2 or wow, given: {s}"
                ))
            })
    }
}

/// Battle.net region, which selects the endpoint host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
    Kr,
    Tw,
    Cn,
    /// Southeast Asia, StarCraft II only
    Sea,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Us,
        Region::Eu,
        Region::Kr,
        Region::Tw,
        Region::Cn,
        Region::Sea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Tw => "tw",
            Region::Cn => "cn",
            Region::Sea => "sea",
        }
    }

    pub fn supports(&self, game: Game) -> bool {
        *self != Region::Sea || game == Game::Sc2
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = BattleNetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| {
                let available: Vec<&str> = Region::ALL.iter().map(Region::as_str).collect();
                BattleNetError::configuration(format!(
                    "Region must be one of: {}, given: {s}",
                    available.join(", ")
                ))
            })
    }
}

/// Validated game and region pair.
///
/// Construction is the only place the pair is checked, so every instance
/// yields valid endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderConfig {
    game: Game,
    region: Region,
}

impl ProviderConfig {
    pub fn new(game: Game, region: Region) -> BattleNetResult<Self> {
        if !region.supports(game) {
            return Err(BattleNetError::configuration(format!(
                "{region} region is only available for sc2"
            )));
        }

        Ok(Self { game, region })
    }

    /// Validate raw option strings. A missing region means `us`.
    pub fn parse(game: &str, region: Option<&str>) -> BattleNetResult<Self> {
        let game: Game = game.parse()?;
        let region = region
            .map(str::parse::<Region>)
            .transpose()?
            .unwrap_or_default();
        Self::new(game, region)
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn region(&self) -> Region {
        self.region
    }

    fn base_url(&self) -> String {
        format!("https://{}.{}", self.region, DOMAIN)
    }

    pub fn authorization_url(&self) -> String {
        format!("{}/oauth/authorize", self.base_url())
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url())
    }

    /// User-info URL with the access token in the query string. The token is
    /// form-urlencoded; unreserved characters pass through unchanged.
    pub fn user_info_url(&self, access_token: &str) -> String {
        let token: String = form_urlencoded::byte_serialize(access_token.as_bytes()).collect();
        format!("{}/oauth/userinfo?access_token={}", self.base_url(), token)
    }

    pub fn default_scopes(&self) -> Vec<String> {
        vec![self.game.profile_scope()]
    }
}

/// Client registration with Battle.net
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ClientCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

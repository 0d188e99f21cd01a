//! Provider settings loaded from a TOML file and the environment.
//!
//! Environment variables use the `BATTLENET` prefix with `__` as separator,
//! e.g. `BATTLENET__CLIENT_ID`, and take precedence over the file.

use crate::error::BattleNetResult;
use crate::provider::BattleNetProvider;
use crate::provider_config::{ClientCredentials, ProviderConfig};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Raw provider options.
///
/// Game and region stay strings here so that bad values are reported by
/// [`ProviderConfig`] validation rather than by deserialization.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleNetSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub game: String,
    pub region: Option<String>,
}

impl BattleNetSettings {
    pub const ENV_PREFIX: &'static str = "BATTLENET";

    /// Load settings from an optional config file and the process environment
    pub fn load(path: Option<&Path>) -> BattleNetResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`BattleNetSettings::load`], reading environment variables from
    /// `env` instead of the process when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> BattleNetResult<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            info!("Loading Battle.net settings from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        } else {
            debug!("No settings file given, using environment only");
        }

        builder = builder.add_source(
            Environment::with_prefix(Self::ENV_PREFIX)
                .separator("__")
                .source(env),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(&self.client_id, &self.client_secret, &self.redirect_uri)
    }

    pub fn provider_config(&self) -> BattleNetResult<ProviderConfig> {
        ProviderConfig::parse(&self.game, self.region.as_deref())
    }

    /// Validate the settings and build the provider
    pub fn into_provider(self) -> BattleNetResult<BattleNetProvider> {
        let config = self.provider_config()?;
        Ok(BattleNetProvider::from_config(config, self.credentials()))
    }
}

impl std::fmt::Debug for BattleNetSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleNetSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("game", &self.game)
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BattleNetError;
    use crate::provider_config::{Game, Region};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_settings(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battlenet.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_load_from_file() {
        let (_dir, path) = write_settings(
            r#"
client_id = "file-client"
client_secret = "file-secret"
redirect_uri = "http://localhost:3000/callback"
game = "sc2"
region = "eu"
"#,
        );

        let settings = BattleNetSettings::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(settings.client_id, "file-client");
        assert_eq!(settings.region.as_deref(), Some("eu"));

        let provider = settings.into_provider().unwrap();
        assert_eq!(provider.game(), Game::Sc2);
        assert_eq!(provider.region(), Region::Eu);
        assert_eq!(provider.credentials().client_secret, "file-secret");
    }

    #[test]
    fn test_environment_overrides_file() {
        let (_dir, path) = write_settings(
            r#"
client_id = "file-client"
game = "sc2"
"#,
        );

        let settings = BattleNetSettings::load_with_env(
            Some(&path),
            env(&[
                ("BATTLENET__CLIENT_ID", "env-client"),
                ("BATTLENET__REGION", "kr"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.client_id, "env-client");
        assert_eq!(settings.game, "sc2");
        assert_eq!(settings.region.as_deref(), Some("kr"));
    }

    #[test]
    fn test_missing_region_defaults_to_us() {
        let settings =
            BattleNetSettings::load_with_env(None, env(&[("BATTLENET__GAME", "wow")])).unwrap();

        let provider = settings.into_provider().unwrap();
        assert_eq!(provider.region(), Region::Us);
    }

    #[test]
    fn test_invalid_game_is_a_configuration_error() {
        let settings =
            BattleNetSettings::load_with_env(None, env(&[("BATTLENET__GAME", "diablo")])).unwrap();

        let result = settings.into_provider();
        assert!(matches!(result, Err(BattleNetError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = BattleNetSettings::load_with_env(Some(&path), env(&[]));
        assert!(matches!(result, Err(BattleNetError::Settings(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = BattleNetSettings {
            client_secret: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }
}

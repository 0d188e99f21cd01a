use crate::error::ToolError;
use crate::report::EndpointReport;
use bnet_oauth2::BattleNetSettings;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Show the Battle.net OAuth2 endpoints for a game and region
#[derive(Parser, Debug, Clone)]
#[command(name = "bnet-endpoints")]
#[command(about = "Show the Battle.net OAuth2 endpoints for a game and region")]
#[command(version)]
pub struct Args {
    /// Game whose profile scope is requested (sc2 or wow)
    #[arg(short, long, value_name = "GAME")]
    pub game: Option<String>,

    /// Battle.net region (us, eu, kr, tw, cn, sea). Defaults to us
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// Settings file (TOML). BATTLENET__* environment variables override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Access token to embed in the user-info URL
    #[arg(short, long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// OAuth2 client id, enables the authorization URL
    #[arg(long, value_name = "ID")]
    pub client_id: Option<String>,

    /// Redirect URI registered for the client
    #[arg(long, value_name = "URI")]
    pub redirect_uri: Option<String>,

    /// State for the authorization URL (random when omitted)
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Settings from the config file and environment, with flags applied on top
    pub fn settings(&self) -> Result<BattleNetSettings, ToolError> {
        self.settings_with_env(None)
    }

    /// Like [`Args::settings`], reading `BATTLENET__*` variables from `env`
    /// instead of the process environment when given
    pub fn settings_with_env(
        &self,
        env: Option<HashMap<String, String>>,
    ) -> Result<BattleNetSettings, ToolError> {
        let mut settings = BattleNetSettings::load_with_env(self.config.as_deref(), env)?;

        if let Some(game) = &self.game {
            settings.game = game.clone();
        }
        if let Some(region) = &self.region {
            settings.region = Some(region.clone());
        }
        if let Some(client_id) = &self.client_id {
            settings.client_id = client_id.clone();
        }
        if let Some(redirect_uri) = &self.redirect_uri {
            settings.redirect_uri = redirect_uri.clone();
        }

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Build the report and render it
    pub fn run(&self) -> Result<String, ToolError> {
        self.run_with_env(None)
    }

    pub fn run_with_env(&self, env: Option<HashMap<String, String>>) -> Result<String, ToolError> {
        let provider = self.settings_with_env(env)?.into_provider()?;
        let report = EndpointReport::new(&provider, self.token.as_deref(), self.state.clone())?;

        if self.json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(report.to_text())
        }
    }
}

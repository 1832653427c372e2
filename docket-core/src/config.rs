//! docket configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiClient;
use crate::error::{DocketError, DocketResult};
use crate::session::Session;

static DEFAULT_API_URL: &str = "http://localhost:5000/api";
static DEFAULT_SESSION_FILE: &str = "~/.config/docket/session.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_FILE)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/docket/config.toml
///
/// Every key can be overridden with a `DOCKET_` environment variable,
/// e.g. `DOCKET_API_URL`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocketConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// IANA zone the calendar is shown in. Defaults to the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl Default for DocketConfig {
    fn default() -> Self {
        DocketConfig {
            api_url: default_api_url(),
            timezone: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: default_session_file(),
        }
    }
}

impl DocketConfig {
    pub fn config_path() -> DocketResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DocketError::Config("Could not determine config directory".into()))?
            .join("docket");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/docket/config.toml, creating a commented-out default
    /// file the first time.
    pub fn load() -> DocketResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DocketResult<Self> {
        debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DOCKET"))
            .build()
            .map_err(|e| DocketError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DocketError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DocketResult<()> {
        let contents = format!(
            "\
# docket configuration

# Base URL of the case-management API:
# api_url = \"{DEFAULT_API_URL}\"

# Time zone for the calendar (defaults to the system time zone):
# timezone = \"America/New_York\"

# Seconds to wait for the API before giving up:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Where the sign-in session (token and user) is stored:
# session_file = \"{DEFAULT_SESSION_FILE}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DocketError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DocketError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Session file path with `~` expanded.
    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.session_file.to_string_lossy()).into_owned())
    }

    /// The configured time zone, if one is set.
    pub fn timezone(&self) -> DocketResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| DocketError::Config(format!("Unknown time zone '{name}'")))
            })
            .transpose()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API client for the configured backend, signed in with the stored session.
    pub fn client(&self) -> DocketResult<ApiClient> {
        let session = Session::load(&self.session_path())?;
        ApiClient::with_timeout(&self.api_url, session, self.request_timeout())
    }
}

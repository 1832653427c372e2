use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use docket_core::api::ApiClient;
use docket_core::config::DocketConfig;
use tracing::{debug, warn};

/// Everything a command needs: config, display time zone and API client.
pub struct Context {
    pub config: DocketConfig,
    pub tz: Tz,
    pub client: ApiClient,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = DocketConfig::load().context("Could not load docket config")?;
        let tz = resolve_timezone(config.timezone()?);
        let client = config
            .client()
            .context("Could not set up the API client")?;

        debug!(%tz, api = %client.base_url(), "context ready");

        Ok(Context { config, tz, client })
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Configured zone, else the system zone, else UTC.
fn resolve_timezone(configured: Option<Tz>) -> Tz {
    if let Some(tz) = configured {
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            warn!(zone = %name, "unknown system time zone, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            debug!(error = %e, "could not read system time zone, using UTC");
            Tz::UTC
        }
    }
}

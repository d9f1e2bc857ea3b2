use carbon_core::{ConfigError, DispatcherConfig};
use carbon_http_manager::HttpConfig;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::location::Coordinate;

pub const INTENSITY_API: &str = "https://api.carbonintensity.org.uk";
pub const POSTCODE_API: &str = "https://api.postcodes.io";

/// Everything an embedder can tune, read from TOML.
///
/// ```toml
/// refresh_after_minutes = 30
///
/// [dispatcher]
/// effect_timeout_ms = 15000
///
/// [location]
/// latitude = 51.403366
/// longitude = -0.298302
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub intensity_api: String,
    pub postcode_api: String,
    /// Minimum age of a dataset before it is fetched again.
    pub refresh_after_minutes: u32,
    pub dispatcher: DispatcherConfig,
    pub http: HttpConfig,
    /// Fixed position for shells without geolocation.
    pub location: Option<Coordinate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            intensity_api: INTENSITY_API.to_string(),
            postcode_api: POSTCODE_API.to_string(),
            refresh_after_minutes: 30,
            dispatcher: DispatcherConfig::default(),
            http: HttpConfig::default(),
            location: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Endpoints {
    pub intensity: Url,
    pub postcode: Url,
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoints()?;
        self.dispatcher.validate()?;
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "http.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn refresh_after(&self) -> Duration {
        Duration::minutes(i64::from(self.refresh_after_minutes))
    }

    pub(crate) fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints {
            intensity: parse_api("intensity_api", &self.intensity_api)?,
            postcode: parse_api("postcode_api", &self.postcode_api)?,
        })
    }
}

fn parse_api(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        field,
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("`{raw}` cannot be used as a base url"),
        });
    }
    Ok(url)
}

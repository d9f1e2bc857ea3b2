use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::endpoint;
use super::intensity::{format_period, Period};

/// Forecast (and, for past periods, actual) national intensity for 24 hours from `from`.
pub fn url(base: &Url, from: &DateTime<Utc>) -> Result<Url, url::ParseError> {
    endpoint(base, &format!("intensity/{}/fw24h", format_period(from)))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalResponse {
    pub data: Vec<Period>,
}

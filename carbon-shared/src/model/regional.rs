use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::endpoint;
use super::intensity::{format_period, Period};

pub fn url(base: &Url, from: &DateTime<Utc>, outcode: &str) -> Result<Url, url::ParseError> {
    endpoint(
        base,
        &format!(
            "regional/intensity/{}/fw24h/postcode/{outcode}",
            format_period(from)
        ),
    )
}

/// The region a postcode falls in, with its forecast periods.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionalResponse {
    pub data: Region,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "regionid")]
    pub region_id: i64,
    #[serde(rename = "dnoregion", default)]
    pub dno_region: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub postcode: String,
    pub data: Vec<Period>,
}

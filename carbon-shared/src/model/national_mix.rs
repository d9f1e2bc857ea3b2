use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::endpoint;
use super::intensity::{format_period, Period};

pub fn url(base: &Url, from: &DateTime<Utc>) -> Result<Url, url::ParseError> {
    let to = *from + Duration::hours(24);
    endpoint(
        base,
        &format!("generation/{}/{}", format_period(from), format_period(&to)),
    )
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalMixResponse {
    pub data: Vec<Period>,
}

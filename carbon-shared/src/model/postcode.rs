use serde::{Deserialize, Serialize};
use url::Url;

use super::endpoint;
use super::location::Coordinate;

/// Reverse geocode: postcodes nearest to `coordinate`.
pub fn url(base: &Url, coordinate: &Coordinate) -> Result<Url, url::ParseError> {
    let mut url = endpoint(base, "postcodes")?;
    url.query_pairs_mut()
        .append_pair("lat", &coordinate.latitude.to_string())
        .append_pair("lon", &coordinate.longitude.to_string());
    Ok(url)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostcodeResponse {
    pub status: u16,
    /// `null` when nothing is near enough.
    #[serde(default)]
    pub result: Option<Vec<Postcode>>,
}

impl PostcodeResponse {
    /// The nearest postcode, if any.
    pub fn nearest(&self) -> Option<&Postcode> {
        self.result.as_deref().and_then(<[Postcode]>::first)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Postcode {
    pub postcode: String,
    pub outcode: String,
    #[serde(default)]
    pub admin_district: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

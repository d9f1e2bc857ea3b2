use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-hour settlement period as reported by the carbon intensity API.
///
/// Intensity endpoints fill `intensity`, generation endpoints fill
/// `generation_mix`, regional endpoints fill both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(with = "period_time")]
    pub from: DateTime<Utc>,
    #[serde(with = "period_time")]
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default, rename = "generationmix")]
    pub generation_mix: Option<Vec<GenerationMix>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intensity {
    pub forecast: i32,
    pub actual: Option<i32>,
    pub index: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationMix {
    pub fuel: String,
    #[serde(rename = "perc")]
    pub percentage: f32,
}

/// Minute-precision UTC timestamp used in API paths and payloads, e.g. `2023-07-06T20:30Z`.
pub(crate) fn format_period(instant: &DateTime<Utc>) -> String {
    instant.format(period_time::FORMAT).to_string()
}

mod period_time {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%dT%H:%MZ";

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&instant.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(serde::de::Error::custom)
    }
}

//! Clock capability for carbon.
//!
//! The core asks for the time with a unit `Time` effect and gets back a
//! [`TimeResponse`] holding an RFC 3339 instant.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeResponse(pub String);

impl TimeResponse {
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        TimeResponse(instant.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Parse the carried instant. Offsets other than `Z` are normalised to UTC.
    pub fn instant(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.0).map(|instant| instant.with_timezone(&Utc))
    }
}

/// Where a shell reads the time from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeManager {
    #[default]
    System,
    /// Always answers the same instant; for tests and replays.
    Fixed(DateTime<Utc>),
}

impl TimeManager {
    pub fn now(&self) -> TimeResponse {
        match self {
            TimeManager::System => TimeResponse::from_instant(Utc::now()),
            TimeManager::Fixed(instant) => TimeResponse::from_instant(*instant),
        }
    }
}

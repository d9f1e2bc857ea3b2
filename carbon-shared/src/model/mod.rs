use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use self::intensity::Period;
use self::location::Location;

pub mod intensity;
pub mod location;
pub mod national;
pub mod national_mix;
pub mod postcode;
pub mod regional;

/// Which dataset the user is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    National,
    Local,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub intensity: Vec<Period>,
    pub mix: Vec<Period>,
    /// Clock reading of the last successful fetch; the epoch until then.
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub mode: Mode,
    pub time: DateTime<Utc>,
    pub national: Dataset,
    pub local: Dataset,
    /// Where the local dataset was fetched for.
    pub location: Option<Location>,
}

impl Model {
    pub fn dataset(&self, mode: Mode) -> &Dataset {
        match mode {
            Mode::National => &self.national,
            Mode::Local => &self.local,
        }
    }
}

/// `path` resolved below `base`, whether or not `base` ends in a slash.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        return base.join(path);
    }
    let mut base = base.clone();
    let dir = format!("{}/", base.path());
    base.set_path(&dir);
    base.join(path)
}

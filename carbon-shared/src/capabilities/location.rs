use serde::{Deserialize, Serialize};

use crate::model::location::Coordinate;

/// Ask the shell where the device is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest;

/// `location` is `None` when the position is unknown or permission was refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location: Option<Coordinate>,
}

/// Location source for shells without platform geolocation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LocationManager {
    #[default]
    Unavailable,
    Fixed(Coordinate),
}

impl LocationManager {
    pub fn locate(&self, _request: LocationRequest) -> LocationResponse {
        match self {
            LocationManager::Unavailable => LocationResponse { location: None },
            LocationManager::Fixed(coordinate) => LocationResponse {
                location: Some(*coordinate),
            },
        }
    }
}

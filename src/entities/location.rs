use serde::{Deserialize, Serialize};

/// A place picked through the autocomplete widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
        }
    }

    /// Placeholder for a slot the user has not filled yet (`{ "", 0, 0 }`)
    pub fn unselected() -> Self {
        Self::new("", 0.0, 0.0)
    }

    pub fn is_selected(&self) -> bool {
        !self.address.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Location,
    Airport,
}

/// Which end of the trip a selection applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationRole {
    Pickup,
    Dropoff,
}

impl LocationRole {
    /// Draft field key for this end of the trip
    pub fn field_key(self) -> &'static str {
        match self {
            LocationRole::Pickup => "pickupLocation",
            LocationRole::Dropoff => "dropoffLocation",
        }
    }
}

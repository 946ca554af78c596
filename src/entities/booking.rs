use serde::{Deserialize, Serialize};

use super::location::{Location, LocationType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripType {
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "hourly")]
    Hourly,
}

/// In-progress booking as the user is filling it in.
///
/// Nothing here is guaranteed valid; the validator turns it into a
/// [`NormalizedBooking`] or a set of field errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub trip_type: Option<TripType>,
    pub pickup_date: String,
    pub pickup_time: String,
    pub pickup_location_type: Option<LocationType>,
    pub pickup_location: Option<Location>,
    pub stops: Vec<Location>,
    pub dropoff_location_type: Option<LocationType>,
    pub dropoff_location: Option<Location>,
    pub phone: String,
    pub is_recognized: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub passengers: Option<i64>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            trip_type: Some(TripType::OneWay),
            pickup_date: String::new(),
            pickup_time: String::new(),
            pickup_location_type: Some(LocationType::Location),
            pickup_location: None,
            stops: Vec::new(),
            dropoff_location_type: Some(LocationType::Location),
            dropoff_location: None,
            phone: String::new(),
            is_recognized: false,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            passengers: None,
        }
    }
}

/// Validated booking, ready to be sent to the submission endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBooking {
    pub trip_type: TripType,
    pub pickup_date: String,
    pub pickup_time: String,
    pub pickup_location_type: LocationType,
    pub pickup_location: Location,
    pub stops: Vec<Location>,
    pub dropoff_location_type: LocationType,
    pub dropoff_location: Location,
    pub phone: String,
    pub is_recognized: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub passengers: u32,
}

/// Display-only distance/duration estimate between pickup and dropoff
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInfo {
    pub distance: String,
    pub duration: String,
}

impl TripInfo {
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty() && self.duration.is_empty()
    }
}

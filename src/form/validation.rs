//! Submit-time validation of a [`Draft`].
//!
//! Every rule runs on every call; each failing rule adds one message under its
//! dot-path key, and only the first message for a key is kept. The contact
//! block is chosen per call from the draft's recognition flag.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{Draft, Location, NormalizedBooking};
use crate::utils::contact::{is_valid_email, is_valid_phone};

pub const TRIP_TYPE_REQUIRED: &str = "Please select a trip type";
pub const PICKUP_DATE_REQUIRED: &str = "Pickup date is required";
pub const PICKUP_DATE_PAST: &str = "Pickup date cannot be in the past";
pub const PICKUP_TIME_REQUIRED: &str = "Pickup time is required";
pub const LOCATION_TYPE_REQUIRED: &str = "Please select a location type";
pub const LOCATION_REQUIRED: &str = "Location is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const PASSENGERS_MISSING: &str = "Enter number of passengers";
pub const PASSENGERS_TOO_FEW: &str = "At least 1 passenger is required";
pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";

/// Field errors keyed by dot-path (`pickupLocation.address`, `stops.0.address`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the key already has one
    pub fn insert_first(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Contact-detail rules, selected from the recognition flag at validation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRules {
    /// Directory matched the phone: names and email are not required
    Recognized,
    /// Unknown caller: names and a well-formed email are required
    Unrecognized,
}

impl ContactRules {
    pub fn for_draft(draft: &Draft) -> Self {
        if draft.is_recognized {
            ContactRules::Recognized
        } else {
            ContactRules::Unrecognized
        }
    }

    fn check(self, draft: &Draft, errors: &mut FieldErrors) {
        match self {
            ContactRules::Recognized => {}
            ContactRules::Unrecognized => {
                if draft.first_name.trim().is_empty() {
                    errors.insert_first("firstName", FIRST_NAME_REQUIRED);
                }
                if draft.last_name.trim().is_empty() {
                    errors.insert_first("lastName", LAST_NAME_REQUIRED);
                }
                if draft.email.trim().is_empty() {
                    errors.insert_first("email", EMAIL_REQUIRED);
                } else if !is_valid_email(&draft.email) {
                    errors.insert_first("email", EMAIL_INVALID);
                }
            }
        }
    }
}

/// Turns a draft into a [`NormalizedBooking`] or a set of field errors.
///
/// `today` is the cut-off for the pickup date. The comparison is done on the
/// `YYYY-MM-DD` strings, not on parsed dates.
#[derive(Debug, Clone)]
pub struct Validator {
    today: String,
}

impl Validator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self, draft: &Draft) -> Result<NormalizedBooking, FieldErrors> {
        let mut errors = FieldErrors::new();

        if draft.trip_type.is_none() {
            errors.insert_first("tripType", TRIP_TYPE_REQUIRED);
        }

        if draft.pickup_date.is_empty() {
            errors.insert_first("pickupDate", PICKUP_DATE_REQUIRED);
        } else if draft.pickup_date.as_str() < self.today.as_str() {
            errors.insert_first("pickupDate", PICKUP_DATE_PAST);
        }

        if draft.pickup_time.is_empty() {
            errors.insert_first("pickupTime", PICKUP_TIME_REQUIRED);
        }

        if draft.pickup_location_type.is_none() {
            errors.insert_first("pickupLocationType", LOCATION_TYPE_REQUIRED);
        }
        if draft.dropoff_location_type.is_none() {
            errors.insert_first("dropoffLocationType", LOCATION_TYPE_REQUIRED);
        }

        let pickup = draft.pickup_location.clone().unwrap_or_else(Location::unselected);
        check_location(&pickup, "pickupLocation", &mut errors);

        for (index, stop) in draft.stops.iter().enumerate() {
            check_location(stop, &format!("stops.{}", index), &mut errors);
        }

        let dropoff = draft.dropoff_location.clone().unwrap_or_else(Location::unselected);
        check_location(&dropoff, "dropoffLocation", &mut errors);

        if draft.phone.is_empty() {
            errors.insert_first("phone", PHONE_REQUIRED);
        } else if !is_valid_phone(&draft.phone) {
            errors.insert_first("phone", PHONE_INVALID);
        }

        let passengers = match draft.passengers {
            None => {
                errors.insert_first("passengers", PASSENGERS_MISSING);
                None
            }
            Some(n) if n < 1 => {
                errors.insert_first("passengers", PASSENGERS_TOO_FEW);
                None
            }
            Some(n) => match u32::try_from(n) {
                Ok(n) => Some(n),
                Err(_) => {
                    errors.insert_first("passengers", PASSENGERS_MISSING);
                    None
                }
            },
        };

        ContactRules::for_draft(draft).check(draft, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        match (
            draft.trip_type,
            draft.pickup_location_type,
            draft.dropoff_location_type,
            passengers,
        ) {
            (Some(trip_type), Some(pickup_location_type), Some(dropoff_location_type), Some(passengers)) => {
                Ok(NormalizedBooking {
                    trip_type,
                    pickup_date: draft.pickup_date.clone(),
                    pickup_time: draft.pickup_time.clone(),
                    pickup_location_type,
                    pickup_location: pickup,
                    stops: draft.stops.clone(),
                    dropoff_location_type,
                    dropoff_location: dropoff,
                    phone: draft.phone.clone(),
                    is_recognized: draft.is_recognized,
                    first_name: draft.first_name.clone(),
                    last_name: draft.last_name.clone(),
                    email: draft.email.clone(),
                    passengers,
                })
            }
            // Every None above has already produced an error
            _ => Err(errors),
        }
    }
}

/// Coordinates are carried through as-is; only the address is checked
fn check_location(location: &Location, prefix: &str, errors: &mut FieldErrors) {
    if !location.is_selected() {
        errors.insert_first(format!("{}.address", prefix), LOCATION_REQUIRED);
    }
}

//! Per-session form state: the draft, its field errors, and the side state the
//! page shows around it (trip summary, contact panel, submit banner).

pub mod store;
pub mod validation;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::entities::{Customer, Draft, Location, LocationRole, LocationType, TripInfo, TripType};
use crate::services::CustomerDirectory;
use validation::FieldErrors;

pub use store::SessionStore;
pub use validation::{ContactRules, Validator};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Stop {index} does not exist ({len} stops)")]
    StopOutOfRange { index: usize, len: usize },

    #[error("Submission already in progress")]
    SubmitInProgress,
}

/// A single edit to a user-editable draft field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    TripType(Option<TripType>),
    PickupDate(String),
    PickupTime(String),
    PickupLocationType(Option<LocationType>),
    DropoffLocationType(Option<LocationType>),
    Phone(String),
    FirstName(String),
    LastName(String),
    Email(String),
    Passengers(#[serde(deserialize_with = "passenger_count")] Option<i64>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PassengerInput {
    Count(i64),
    Fraction(f64),
    Text(String),
}

/// Number input value: a count, or text where blank or non-numeric means "not entered"
fn passenger_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PassengerInput>::deserialize(deserializer)? {
        Some(PassengerInput::Count(n)) => Some(n),
        Some(PassengerInput::Fraction(n)) if n.is_finite() => Some(n.trunc() as i64),
        Some(PassengerInput::Fraction(_)) => None,
        Some(PassengerInput::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

impl FieldUpdate {
    /// Error-map key of the field this update targets
    pub fn key(&self) -> &'static str {
        match self {
            FieldUpdate::TripType(_) => "tripType",
            FieldUpdate::PickupDate(_) => "pickupDate",
            FieldUpdate::PickupTime(_) => "pickupTime",
            FieldUpdate::PickupLocationType(_) => "pickupLocationType",
            FieldUpdate::DropoffLocationType(_) => "dropoffLocationType",
            FieldUpdate::Phone(_) => "phone",
            FieldUpdate::FirstName(_) => "firstName",
            FieldUpdate::LastName(_) => "lastName",
            FieldUpdate::Email(_) => "email",
            FieldUpdate::Passengers(_) => "passengers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Success,
    Error,
}

/// What the contact section should show under the phone input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ContactPanel {
    /// No lookup since the phone was last edited
    Hidden,
    /// Known customer; only a greeting is shown
    Welcome { name: String },
    /// Unknown number; name and email inputs are shown
    CollectDetails,
}

/// Pending distance lookup. Only the newest token's result is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub token: u64,
    pub pickup: Location,
    pub dropoff: Location,
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    draft: Draft,
    errors: FieldErrors,
    trip_info: TripInfo,
    phone_looked_up: bool,
    customer_name: String,
    submit_status: Option<SubmitStatus>,
    submitting: bool,
    trip_token: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn trip_info(&self) -> &TripInfo {
        &self.trip_info
    }

    pub fn submit_status(&self) -> Option<SubmitStatus> {
        self.submit_status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn contact_panel(&self) -> ContactPanel {
        if !self.phone_looked_up {
            ContactPanel::Hidden
        } else if self.draft.is_recognized {
            ContactPanel::Welcome {
                name: self.customer_name.clone(),
            }
        } else {
            ContactPanel::CollectDetails
        }
    }

    /// Replace one field and drop the error stored under exactly its key.
    /// Does not revalidate.
    pub fn update_field(&mut self, update: FieldUpdate) {
        let key = update.key();
        let draft = &mut self.draft;

        match update {
            FieldUpdate::TripType(value) => draft.trip_type = value,
            FieldUpdate::PickupDate(value) => draft.pickup_date = value,
            FieldUpdate::PickupTime(value) => draft.pickup_time = value,
            FieldUpdate::PickupLocationType(value) => draft.pickup_location_type = value,
            FieldUpdate::DropoffLocationType(value) => draft.dropoff_location_type = value,
            FieldUpdate::Phone(value) => {
                draft.phone = value;
                // Recognition stays as-is until the next lookup
                self.phone_looked_up = false;
            }
            FieldUpdate::FirstName(value) => draft.first_name = value,
            FieldUpdate::LastName(value) => draft.last_name = value,
            FieldUpdate::Email(value) => draft.email = value,
            FieldUpdate::Passengers(value) => draft.passengers = value,
        }

        self.errors.remove(key);
    }

    pub fn add_stop(&mut self) {
        self.draft.stops.push(Location::unselected());
    }

    pub fn update_stop(&mut self, index: usize, location: Location) -> Result<(), FormError> {
        let len = self.draft.stops.len();
        let slot = self
            .draft
            .stops
            .get_mut(index)
            .ok_or(FormError::StopOutOfRange { index, len })?;
        *slot = location;
        Ok(())
    }

    pub fn remove_stop(&mut self, index: usize) -> Result<Location, FormError> {
        let len = self.draft.stops.len();
        if index >= len {
            return Err(FormError::StopOutOfRange { index, len });
        }
        Ok(self.draft.stops.remove(index))
    }

    /// Fill in contact details from the directory. Empty phone is ignored.
    pub fn lookup_phone(&mut self, phone: &str, directory: &dyn CustomerDirectory) -> Option<Customer> {
        if phone.is_empty() {
            return None;
        }

        let found = directory.find(phone);
        let draft = &mut self.draft;
        match &found {
            Some(customer) => {
                draft.is_recognized = true;
                draft.first_name = customer.first_name.clone();
                draft.last_name = customer.last_name.clone();
                draft.email = customer.email.clone();
                self.customer_name = customer.first_name.clone();
            }
            None => {
                draft.is_recognized = false;
                draft.first_name.clear();
                draft.last_name.clear();
                draft.email.clear();
                self.customer_name.clear();
            }
        }
        self.phone_looked_up = true;

        found
    }

    /// Store a picked location. Once both ends are set, returns the distance
    /// request the caller should run.
    pub fn record_location_selection(
        &mut self,
        role: LocationRole,
        location: Location,
    ) -> Option<TripRequest> {
        let key = role.field_key();
        let cleared = !location.is_selected();
        match role {
            LocationRole::Pickup => self.draft.pickup_location = Some(location),
            LocationRole::Dropoff => self.draft.dropoff_location = Some(location),
        }
        self.errors.remove(key);
        self.errors.remove(&format!("{}.address", key));

        if cleared {
            // The old estimate no longer describes the trip, and any lookup
            // still in flight is for the previous pair
            self.trip_info = TripInfo::default();
            self.trip_token += 1;
            return None;
        }

        let pickup = self.draft.pickup_location.clone().filter(Location::is_selected)?;
        let dropoff = self.draft.dropoff_location.clone().filter(Location::is_selected)?;

        self.trip_token += 1;
        Some(TripRequest {
            token: self.trip_token,
            pickup,
            dropoff,
        })
    }

    /// Apply a finished distance lookup. Returns false for superseded results.
    pub fn apply_trip_info(&mut self, token: u64, info: TripInfo) -> bool {
        if token != self.trip_token {
            return false;
        }
        self.trip_info = info;
        true
    }

    pub fn reset(&mut self) {
        let next_token = self.trip_token + 1;
        *self = Self {
            trip_token: next_token,
            ..Self::default()
        };
    }

    /// Replace the error map with the result of a failed submit
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
        self.submit_status = None;
    }

    pub fn begin_submit(&mut self) -> Result<(), FormError> {
        if self.submitting {
            return Err(FormError::SubmitInProgress);
        }
        self.submitting = true;
        self.submit_status = None;
        self.errors.clear();
        Ok(())
    }

    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        self.submit_status = Some(if succeeded {
            SubmitStatus::Success
        } else {
            SubmitStatus::Error
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryDirectory;

    fn loc(address: &str) -> Location {
        Location::new(address, 42.0, -71.0)
    }

    #[test]
    fn test_update_field_clears_only_its_error() {
        let mut session = FormSession::new();
        let mut errors = FieldErrors::new();
        errors.insert_first("pickupDate", "Pickup date is required");
        errors.insert_first("pickupTime", "Pickup time is required");
        errors.insert_first("pickupLocation.address", "Location is required");
        session.set_errors(errors);

        session.update_field(FieldUpdate::PickupDate("2026-11-01".to_string()));

        assert_eq!(session.draft().pickup_date, "2026-11-01");
        assert!(!session.errors().contains("pickupDate"));
        assert!(session.errors().contains("pickupTime"));
        assert!(session.errors().contains("pickupLocation.address"));
        assert_eq!(session.errors().len(), 2);
    }

    #[test]
    fn test_field_update_wire_format() {
        let update: FieldUpdate =
            serde_json::from_str(r#"{ "field": "passengers", "value": 2 }"#).unwrap();
        assert_eq!(update, FieldUpdate::Passengers(Some(2)));

        let update: FieldUpdate =
            serde_json::from_str(r#"{ "field": "tripType", "value": "hourly" }"#).unwrap();
        assert_eq!(update, FieldUpdate::TripType(Some(TripType::Hourly)));
        assert_eq!(update.key(), "tripType");
    }

    #[test]
    fn test_passenger_input_text() {
        let parse = |raw: &str| -> FieldUpdate { serde_json::from_str(raw).unwrap() };

        assert_eq!(parse(r#"{ "field": "passengers", "value": "" }"#), FieldUpdate::Passengers(None));
        assert_eq!(parse(r#"{ "field": "passengers", "value": null }"#), FieldUpdate::Passengers(None));
        assert_eq!(parse(r#"{ "field": "passengers", "value": "4" }"#), FieldUpdate::Passengers(Some(4)));
        assert_eq!(parse(r#"{ "field": "passengers", "value": "two" }"#), FieldUpdate::Passengers(None));
        assert_eq!(parse(r#"{ "field": "passengers", "value": 0 }"#), FieldUpdate::Passengers(Some(0)));
        assert_eq!(parse(r#"{ "field": "passengers", "value": 2.7 }"#), FieldUpdate::Passengers(Some(2)));
    }

    #[test]
    fn test_stop_list_mutation() {
        let mut session = FormSession::new();
        session.add_stop();
        session.add_stop();
        session.add_stop();
        assert_eq!(session.draft().stops[0], Location::unselected());

        session.update_stop(0, loc("A")).unwrap();
        session.update_stop(1, loc("B")).unwrap();
        session.update_stop(2, loc("C")).unwrap();

        let removed = session.remove_stop(1).unwrap();
        assert_eq!(removed.address, "B");
        let addresses: Vec<&str> = session.draft().stops.iter().map(|s| s.address.as_str()).collect();
        assert_eq!(addresses, vec!["A", "C"]);
    }

    #[test]
    fn test_stop_index_out_of_range() {
        let mut session = FormSession::new();
        session.add_stop();
        assert_eq!(
            session.update_stop(1, loc("X")),
            Err(FormError::StopOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            session.remove_stop(5),
            Err(FormError::StopOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(session.draft().stops.len(), 1);
    }

    #[test]
    fn test_lookup_known_phone() {
        let directory = InMemoryDirectory::seeded();
        let mut session = FormSession::new();
        session.update_field(FieldUpdate::Phone("+17744153244".to_string()));
        assert_eq!(session.contact_panel(), ContactPanel::Hidden);

        let phone = session.draft().phone.clone();
        assert!(session.lookup_phone(&phone, &directory).is_some());

        let draft = session.draft();
        assert!(draft.is_recognized);
        assert_eq!(draft.first_name, "John");
        assert_eq!(draft.last_name, "Smith");
        assert_eq!(draft.email, "john.smith@example.com");
        assert_eq!(
            session.contact_panel(),
            ContactPanel::Welcome {
                name: "John".to_string()
            }
        );

        // Editing the phone hides the panel but keeps recognition until the next lookup
        session.update_field(FieldUpdate::Phone("+1774415324".to_string()));
        assert!(session.draft().is_recognized);
        assert_eq!(session.contact_panel(), ContactPanel::Hidden);
    }

    #[test]
    fn test_lookup_unknown_phone_clears_contact() {
        let directory = InMemoryDirectory::seeded();
        let mut session = FormSession::new();
        session.lookup_phone("+17744153244", &directory);
        session.lookup_phone("+16175550100", &directory);

        let draft = session.draft();
        assert!(!draft.is_recognized);
        assert!(draft.first_name.is_empty());
        assert!(draft.last_name.is_empty());
        assert!(draft.email.is_empty());
        assert_eq!(session.contact_panel(), ContactPanel::CollectDetails);
    }

    #[test]
    fn test_lookup_is_idempotent_and_ignores_empty() {
        let directory = InMemoryDirectory::seeded();
        let mut session = FormSession::new();
        session.lookup_phone("", &directory);
        assert_eq!(session.contact_panel(), ContactPanel::Hidden);

        session.lookup_phone("+12125551234", &directory);
        let first = session.draft().clone();
        session.lookup_phone("+12125551234", &directory);
        assert_eq!(session.draft(), &first);
    }

    #[test]
    fn test_trip_request_only_when_both_ends_set() {
        let mut session = FormSession::new();
        assert!(session.record_location_selection(LocationRole::Pickup, loc("A")).is_none());

        let request = session
            .record_location_selection(LocationRole::Dropoff, loc("B"))
            .unwrap();
        assert_eq!(request.pickup.address, "A");
        assert_eq!(request.dropoff.address, "B");
    }

    #[test]
    fn test_unselected_end_does_not_request_trip() {
        let mut session = FormSession::new();
        session.record_location_selection(LocationRole::Pickup, loc("Worcester"));
        assert!(session
            .record_location_selection(LocationRole::Dropoff, Location::unselected())
            .is_none());

        let mut session = FormSession::new();
        session.record_location_selection(LocationRole::Pickup, Location::unselected());
        assert!(session
            .record_location_selection(LocationRole::Dropoff, loc("Boston"))
            .is_none());
    }

    #[test]
    fn test_clearing_an_end_drops_trip_info() {
        let mut session = FormSession::new();
        session.record_location_selection(LocationRole::Pickup, loc("A"));
        let request = session
            .record_location_selection(LocationRole::Dropoff, loc("B"))
            .unwrap();
        let info = TripInfo {
            distance: "5.0 mi".to_string(),
            duration: "12 mins".to_string(),
        };
        assert!(session.apply_trip_info(request.token, info.clone()));

        session.record_location_selection(LocationRole::Dropoff, Location::unselected());
        assert!(session.trip_info().is_empty());
        // A lookup for the old pair that lands late is ignored
        assert!(!session.apply_trip_info(request.token, info));
        assert!(session.trip_info().is_empty());
    }

    #[test]
    fn test_location_selection_clears_its_errors() {
        let mut session = FormSession::new();
        let mut errors = FieldErrors::new();
        errors.insert_first("pickupLocation.address", "Location is required");
        errors.insert_first("dropoffLocation.address", "Location is required");
        session.set_errors(errors);

        session.record_location_selection(LocationRole::Pickup, loc("A"));
        assert!(!session.errors().contains("pickupLocation.address"));
        assert!(session.errors().contains("dropoffLocation.address"));
    }

    #[test]
    fn test_stale_trip_info_is_ignored() {
        let mut session = FormSession::new();
        session.record_location_selection(LocationRole::Pickup, loc("A"));
        let first = session
            .record_location_selection(LocationRole::Dropoff, loc("B"))
            .unwrap();
        let second = session
            .record_location_selection(LocationRole::Dropoff, loc("C"))
            .unwrap();

        let latest = TripInfo {
            distance: "5.0 mi".to_string(),
            duration: "12 mins".to_string(),
        };
        assert!(session.apply_trip_info(second.token, latest.clone()));

        let stale = TripInfo {
            distance: "1.0 mi".to_string(),
            duration: "3 mins".to_string(),
        };
        assert!(!session.apply_trip_info(first.token, stale));
        assert_eq!(session.trip_info(), &latest);
    }

    #[test]
    fn test_reset_invalidates_pending_trip_request() {
        let mut session = FormSession::new();
        session.record_location_selection(LocationRole::Pickup, loc("A"));
        let request = session
            .record_location_selection(LocationRole::Dropoff, loc("B"))
            .unwrap();
        session.add_stop();

        session.reset();

        assert_eq!(session.draft(), &Draft::default());
        assert!(!session.apply_trip_info(request.token, TripInfo::default()));
        assert!(session.trip_info().is_empty());
    }

    #[test]
    fn test_submit_bookkeeping() {
        let mut session = FormSession::new();
        session.begin_submit().unwrap();
        assert_eq!(session.begin_submit(), Err(FormError::SubmitInProgress));
        session.finish_submit(false);
        assert_eq!(session.submit_status(), Some(SubmitStatus::Error));
        assert!(!session.is_submitting());
        session.begin_submit().unwrap();
        assert_eq!(session.submit_status(), None);
        session.finish_submit(true);
        assert_eq!(session.submit_status(), Some(SubmitStatus::Success));
    }
}

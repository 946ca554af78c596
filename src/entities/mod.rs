pub mod booking;
pub mod customer;
pub mod location;

pub use booking::{Draft, NormalizedBooking, TripInfo, TripType};
pub use customer::Customer;
pub use location::{Location, LocationRole, LocationType};

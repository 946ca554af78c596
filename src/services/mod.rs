pub mod customers;
pub mod distance;
pub mod places;
pub mod submission;

pub use customers::{CustomerDirectory, InMemoryDirectory};
pub use distance::{DistanceError, DistanceMatrixClient, DistanceService, StraightLineEstimator};
pub use places::PlaceFilter;
pub use submission::{BookingSubmitter, HttpSubmitter, SubmissionError};

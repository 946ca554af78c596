pub mod contact;
pub mod geo;

pub mod contact;
pub mod form;
pub mod submit;
pub mod trip;

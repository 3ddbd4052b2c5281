//! Registration aggregate
//!
//! Join entity enrolling one skier in one course.

pub mod model;
pub mod repository;

pub use model::Registration;
pub use repository::RegistrationRepository;

//! Course aggregate

pub mod model;
pub mod repository;

pub use model::{Course, Support, TypeCourse};
pub use repository::CourseRepository;

//! Piste aggregate

pub mod model;
pub mod repository;

pub use model::{Color, Piste};
pub use repository::PisteRepository;

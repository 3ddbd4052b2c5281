//! Skier aggregate
//!
//! Contains the Skier entity and repository interface.

pub mod model;
pub mod repository;

pub use model::Skier;
pub use repository::SkierRepository;

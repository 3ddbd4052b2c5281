//! Application services

mod skier;

pub use skier::SkierService;

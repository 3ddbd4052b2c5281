//! Subscription aggregate
//!
//! Contains the Subscription entity, its type tag and the end-date rule.

pub mod model;
pub mod repository;

pub use model::{EndDateDerivation, Subscription, SubscriptionType};
pub use repository::SubscriptionRepository;

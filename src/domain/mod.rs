//! Domain layer: entities, business rules and repository ports

pub mod course;
pub mod piste;
pub mod registration;
pub mod repositories;
pub mod skier;
pub mod subscription;

// Re-export commonly used types
pub use course::{Course, CourseRepository, Support, TypeCourse};
pub use piste::{Color, Piste, PisteRepository};
pub use registration::{Registration, RegistrationRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use skier::{Skier, SkierRepository};
pub use subscription::{EndDateDerivation, Subscription, SubscriptionRepository, SubscriptionType};

pub use crate::shared::errors::DomainError;

//! In-memory repository implementations

mod memory;

pub use memory::{
    InMemoryCourseRepository, InMemoryPisteRepository, InMemoryRegistrationRepository,
    InMemoryRepositoryProvider, InMemorySkierRepository, InMemorySubscriptionRepository,
};

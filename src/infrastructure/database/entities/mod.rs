//! Database entities module

pub mod course;
pub mod piste;
pub mod registration;
pub mod skier;
pub mod skier_piste;
pub mod subscription;

pub use course::Entity as Course;
pub use piste::Entity as Piste;
pub use registration::Entity as Registration;
pub use skier::Entity as Skier;
pub use skier_piste::Entity as SkierPiste;
pub use subscription::Entity as Subscription;

//! Course repository interface

use async_trait::async_trait;

use super::model::Course;
use crate::domain::DomainResult;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Course>>;
    async fn find_all(&self) -> DomainResult<Vec<Course>>;
    async fn save(&self, course: Course) -> DomainResult<Course>;
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}

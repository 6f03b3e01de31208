//! Store interfaces consumed by the services.
//!
//! The services depend on these traits only; `postgres` provides the
//! production implementations, and the integration tests supply in-memory
//! ones. List operations take the scoping parameters directly so ownership
//! constraints are applied at the query boundary, never by post-filtering.

pub mod postgres;

use crate::error::AppError;
use crate::models::{NewUser, Page, PageParams, Task, TaskStatus, User};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-sensitive lookup by the login key.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Persists a new user, assigning id and timestamps. A concurrent insert
    /// of the same email surfaces as `AppError::Conflict`.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Persists changes to an existing user. The row is addressed by
    /// `user.id`; a missing row is `AppError::NotFound`.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Returns whether a row was deleted.
    async fn delete_by_id(&self, id: i32) -> Result<bool, AppError>;

    async fn list_all(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    async fn create(&self, task: &Task) -> Result<Task, AppError>;

    async fn update(&self, task: &Task) -> Result<Task, AppError>;

    /// Returns whether a row was deleted.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Tasks owned by `owner_id`, newest first. Rows owned by anyone else are
    /// excluded by the query itself.
    async fn list_by_owner(
        &self,
        owner_id: i32,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError>;

    /// All tasks regardless of owner, newest first.
    async fn list_all(
        &self,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError>;

    /// Removes every task owned by `owner_id`, returning how many were
    /// deleted. Backs the user-delete cascade.
    async fn delete_by_owner(&self, owner_id: i32) -> Result<u64, AppError>;
}

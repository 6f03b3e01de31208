//! Ownership-guarded task operations.
//!
//! Every single-item operation runs the same sequence: load the task
//! (absent → 404, before any ownership question is asked), apply the
//! authorization policy (denied → 403), then mutate. Listing never loads
//! foreign rows for a non-admin at all; the scope is part of the store query.
//!
//! No locks are held between the policy check and the store write. Two
//! concurrent updates to one task are last-write-wins at the store; owners
//! are immutable after creation, so the check-to-write race cannot change
//! who a task belongs to.

use crate::auth::{can_access, Operation, Principal};
use crate::error::AppError;
use crate::models::{Page, PageParams, Task, TaskInput, TaskStatus};
use crate::store::TaskStore;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Creates a task owned by the calling principal. Any owner information
    /// in the input is ignored; the creator is the owner, always.
    pub async fn create(&self, input: TaskInput, principal: &Principal) -> Result<Task, AppError> {
        let task = Task::new(input, principal.user_id);
        let created = self.tasks.create(&task).await?;
        log::info!("task created: id={}, owner_id={}", created.id, created.owner_id);
        Ok(created)
    }

    /// Loads a task the principal is allowed to read.
    pub async fn find_by_id(&self, id: Uuid, principal: &Principal) -> Result<Task, AppError> {
        self.load_guarded(id, principal, Operation::Read).await
    }

    /// Updates a task the principal is allowed to update. Title, description,
    /// and deadline are overwritten; status only when provided; the owner
    /// never changes.
    pub async fn update(
        &self,
        id: Uuid,
        input: TaskInput,
        principal: &Principal,
    ) -> Result<Task, AppError> {
        let mut task = self.load_guarded(id, principal, Operation::Update).await?;
        task.apply(input);
        let updated = self.tasks.update(&task).await?;
        log::info!("task updated: id={}", id);
        Ok(updated)
    }

    /// Deletes a task the principal is allowed to delete.
    pub async fn delete(&self, id: Uuid, principal: &Principal) -> Result<(), AppError> {
        self.load_guarded(id, principal, Operation::Delete).await?;
        self.tasks.delete_by_id(id).await?;
        log::info!("task deleted: id={}", id);
        Ok(())
    }

    /// Lists tasks visible to the principal, newest first.
    ///
    /// Admins see every task (optionally filtered by status); everyone else
    /// gets a query constrained to their own `owner_id` at the store, so
    /// foreign rows are never materialized for them.
    pub async fn list(
        &self,
        principal: &Principal,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        if principal.is_admin() {
            self.tasks.list_all(status, page).await
        } else {
            self.tasks.list_by_owner(principal.user_id, status, page).await
        }
    }

    // Not-found wins: a missing id is reported as 404 even to callers who
    // would not have been authorized to see it.
    async fn load_guarded(
        &self,
        id: Uuid,
        principal: &Principal,
        operation: Operation,
    ) -> Result<Task, AppError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task not found: {}", id)))?;

        if !can_access(principal, task.owner_id, operation) {
            log::warn!(
                "access denied: user {} on task {} owned by {}",
                principal.user_id,
                id,
                task.owner_id
            );
            return Err(AppError::Forbidden("no access to this task".into()));
        }

        Ok(task)
    }
}

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started. The default for new tasks.
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

/// Case-insensitive parse for the `status` query filter. Unknown literals are
/// a 400, not a 500.
impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            _ => Err(AppError::Validation(
                "status must be one of PENDING, IN_PROGRESS, COMPLETED".into(),
            )),
        }
    }
}

/// Input structure for creating or updating a task.
///
/// On creation an absent `status` defaults to `PENDING`. On update an absent
/// `status` leaves the stored status untouched, while `title`, `description`,
/// and `deadline` always overwrite. Any `owner` field in the payload is
/// ignored outright; ownership comes from the authenticated principal.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    /// Optional deadline for the task.
    pub deadline: Option<DateTime<Utc>>,
}

/// A task as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier (UUID v4, assigned at creation).
    pub id: Uuid,
    /// The user who owns this task. Set once at creation, never changed.
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    /// Filter by status; parsed case-insensitively.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` for the given owner.
    /// Sets `created_at` and `updated_at` to now and `id` to a fresh UUID.
    pub fn new(input: TaskInput, owner_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or(TaskStatus::Pending),
            deadline: input.deadline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an update in place. `owner_id`, `id`, and `created_at` are
    /// untouched; `updated_at` is refreshed.
    pub fn apply(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = input.description;
        if let Some(status) = input.status {
            self.status = status;
        }
        self.deadline = input.deadline;
        self.updated_at = Utc::now();
    }
}

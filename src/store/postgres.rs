//! sqlx/Postgres implementations of the store traits.
//!
//! Queries use the runtime `query_as`/`query_scalar` API so the crate builds
//! without a live database. Schema lives under `migrations/`.

use crate::error::AppError;
use crate::models::{NewUser, Page, PageParams, Task, TaskStatus, User};
use crate::store::{TaskStore, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, full_name, role, created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, owner_id, title, description, status, deadline, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, full_name, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.role)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET email = $1, password_hash = $2, full_name = $3, role = $4, updated_at = $5 \
             WHERE id = $6 \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.role)
        .bind(user.updated_at)
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list(
        &self,
        owner_id: Option<i32>,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        let mut filter = String::from("WHERE TRUE");
        if owner_id.is_some() {
            filter.push_str(" AND owner_id = $1");
        }
        if status.is_some() {
            // Parameter index depends on whether the owner filter is bound.
            filter.push_str(if owner_id.is_some() {
                " AND status = $2"
            } else {
                " AND status = $1"
            });
        }

        let count_sql = format!("SELECT COUNT(*) FROM tasks {}", filter);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(owner_id) = owner_id {
            count_query = count_query.bind(owner_id);
        }
        if let Some(status) = status {
            count_query = count_query.bind(status);
        }
        let total = count_query.fetch_one(&self.pool).await? as u64;

        let sql = format!(
            "SELECT {} FROM tasks {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            TASK_COLUMNS, filter, page.size, page.offset()
        );
        let mut items_query = sqlx::query_as::<_, Task>(&sql);
        if let Some(owner_id) = owner_id {
            items_query = items_query.bind(owner_id);
        }
        if let Some(status) = status {
            items_query = items_query.bind(status);
        }
        let items = items_query.fetch_all(&self.pool).await?;

        Ok(Page::new(items, page, total))
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create(&self, task: &Task) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, owner_id, title, description, status, deadline, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.id)
        .bind(task.owner_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.deadline)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $1, description = $2, status = $3, deadline = $4, updated_at = $5 \
             WHERE id = $6 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.deadline)
        .bind(task.updated_at)
        .bind(task.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(
        &self,
        owner_id: i32,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        self.list(Some(owner_id), status, page).await
    }

    async fn list_all(
        &self,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        self.list(None, status, page).await
    }

    async fn delete_by_owner(&self, owner_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The role the authorization policy treats as elevated. `User.role` is free
/// text in the store; everything except this literal is an ordinary user.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Default role stamped onto accounts that register without one.
pub const DEFAULT_ROLE: &str = "USER";

/// A user record as stored and loaded from the store.
///
/// The password hash never leaves the server: it is skipped during
/// serialization, and every outward-facing response uses [`UserResponse`].
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user record about to be persisted; the store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
}

/// The public view of a user. No password field, ever.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}

/// Partial update of a user record. Absent fields are left untouched;
/// a present `password` is re-hashed before persistence.
#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    pub role: Option<String>,
}

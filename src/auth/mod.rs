pub mod middleware;
pub mod password;
pub mod policy;
pub mod principal;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export the items the rest of the crate reaches for.
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use policy::{can_access, Operation};
pub use principal::{Principal, Role};
pub use service::AuthService;
pub use token::{Claims, TokenCodec};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address. Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Doubles as the login key.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Between 6 and 100 characters.
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    /// Display name, at most 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    /// Optional role. Absent or empty defaults to "USER". Free text is
    /// accepted; authorization only elevates the literal "ADMIN".
    pub role: Option<String>,
}

/// Response structure after a successful login: the signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenCodec;
use crate::auth::RegisterRequest;
use crate::error::AppError;
use crate::models::{NewUser, User, DEFAULT_ROLE};
use crate::store::UserStore;
use std::sync::Arc;

/// Registration and login, composing the password hasher, the token codec,
/// and the user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, codec: TokenCodec) -> Self {
        Self { users, codec }
    }

    /// Creates a new account.
    ///
    /// Fails with `AppError::Conflict` when the email already exists
    /// (case-sensitive). An absent or empty role defaults to "USER"; any
    /// other value is persisted as given. The plaintext password is hashed
    /// before persistence and never stored or logged.
    pub async fn register(&self, input: RegisterRequest) -> Result<User, AppError> {
        if self.users.exists_by_email(&input.email).await? {
            log::warn!("registration rejected, email already exists: {}", input.email);
            return Err(AppError::Conflict(format!(
                "email already registered: {}",
                input.email
            )));
        }

        let role = match input.role {
            Some(role) if !role.is_empty() => role,
            _ => DEFAULT_ROLE.to_string(),
        };

        let user = self
            .users
            .create(NewUser {
                email: input.email,
                password_hash: hash_password(&input.password)?,
                full_name: input.full_name,
                role,
            })
            .await?;

        log::info!("user registered: id={}, email={}", user.id, user.email);
        Ok(user)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password fail with the same error kind and
    /// message, so callers cannot probe which emails are registered. No
    /// server-side session state is created; the token is the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::warn!("login failed for {}", email);
                return Err(Self::bad_credentials());
            }
        };

        if !verify_password(password, &user.password_hash)? {
            log::warn!("login failed for {}", email);
            return Err(Self::bad_credentials());
        }

        let token = self.codec.issue(&user.email, user.id)?;
        log::info!("user logged in: id={}, email={}", user.id, user.email);
        Ok(token)
    }

    fn bad_credentials() -> AppError {
        AppError::Unauthorized("invalid email or password".into())
    }
}

use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::ADMIN_ROLE;
use crate::store::UserStore;

/// The closed role enumeration the authorization policy decides over.
///
/// The persisted `User.role` is free text; only the literal "ADMIN" maps to
/// `Role::Admin`, everything else is an ordinary user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn from_name(name: &str) -> Self {
        if name == ADMIN_ROLE {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// The authenticated identity and role for one request.
///
/// Produced fresh per request and owned by it; never persisted. The role is
/// re-read from the store on every resolution rather than trusted from the
/// token, so a role downgrade takes effect on the very next request even
/// while the token is still cryptographically valid.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extracts the principal on routes behind `AuthMiddleware`.
///
/// The middleware verified the token and placed its claims in request
/// extensions; this extractor resolves the claims against the current user
/// record. Missing claims (middleware not applied, or an anonymous request
/// slipping through) and a since-deleted account both fail closed with 401.
impl FromRequest for Principal {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let store = req.app_data::<web::Data<dyn UserStore>>().cloned();

        Box::pin(async move {
            let claims = claims
                .ok_or_else(|| AppError::Unauthorized("authentication required".into()))?;
            let store =
                store.ok_or_else(|| AppError::Internal("user store not configured".into()))?;

            let user = store
                .find_by_email(&claims.sub)
                .await?
                .ok_or_else(|| AppError::Unauthorized("account no longer exists".into()))?;

            Ok(Principal {
                user_id: user.id,
                email: user.email,
                role: Role::from_name(&user.role),
            })
        })
    }
}

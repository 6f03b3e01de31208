use crate::{
    auth::{AuthService, LoginRequest, RegisterRequest, TokenResponse},
    error::AppError,
    models::UserResponse,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its public view. No token is
/// issued here; the client logs in separately.
///
/// ## Responses:
/// - `201 Created`: the public user (no password field).
/// - `400 Bad Request`: validation failure.
/// - `409 Conflict`: the email is already registered.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let user = service.register(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login
///
/// Authenticates a user and returns a session token valid for one hour.
///
/// ## Responses:
/// - `200 OK`: `{ "token": "..." }`.
/// - `400 Bad Request`: validation failure.
/// - `401 Unauthorized`: bad credentials. The response is identical for an
///   unknown email and a wrong password.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let token = service.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions that can occur, from authentication failures
//! to database issues.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into the appropriate HTTP responses with JSON bodies.
//! It also provides `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError`, allowing conversion with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to one error kind of the API surface. The boundary
/// layer (`ResponseError`) is solely responsible for mapping kind to status
/// code; services only ever raise the typed variant.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid input (HTTP 400). Never touches auth logic.
    Validation(String),
    /// Authentication failure: bad login credentials or a missing, unparseable,
    /// or expired token (HTTP 401).
    Unauthorized(String),
    /// The caller is authenticated but not authorized for this resource
    /// (HTTP 403).
    Forbidden(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// A uniqueness conflict, e.g. registering an email that already exists
    /// (HTTP 409).
    Conflict(String),
    /// An error originating from the store (HTTP 500). The detail is logged,
    /// never sent to the caller.
    Database(String),
    /// An unexpected server-side error (HTTP 500). The detail is logged,
    /// never sent to the caller.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
            }
            // 500s never echo internals back to the caller.
            AppError::Database(msg) | AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({ "error": "internal server error" }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; a unique-constraint violation maps to
/// `Conflict` (the register check/insert race still surfaces as 409); anything
/// else becomes `Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("record already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// JWT processing failures (bad signature, malformed token, expiry) are
/// authentication failures.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::Validation("bad input".into()), 400),
            (AppError::Unauthorized("no token".into()), 401),
            (AppError::Forbidden("not yours".into()), 403),
            (AppError::NotFound("missing".into()), 404),
            (AppError::Conflict("duplicate".into()), 409),
            (AppError::Database("connection reset".into()), 500),
            (AppError::Internal("boom".into()), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let error = AppError::Database("password for svc_account rejected".into());
        let response = error.error_response();
        let body = actix_web::body::to_bytes(response.into_body());
        let body = futures::executor::block_on(body).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal server error");
    }

    #[test]
    fn test_jwt_error_maps_to_unauthorized() {
        let jwt_err = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::ExpiredSignature,
        );
        match AppError::from(jwt_err) {
            AppError::Unauthorized(msg) => assert!(msg.contains("invalid token")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        match AppError::from(sqlx::Error::RowNotFound) {
            AppError::NotFound(_) => {}
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}

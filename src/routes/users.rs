use crate::{
    auth::{can_access, hash_password, AuthService, Operation, Principal, RegisterRequest},
    error::AppError,
    models::{User, UserResponse, UserUpdateRequest},
    store::{TaskStore, UserStore},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

/// Lists every user. Admin only.
///
/// ## Responses:
/// - `200 OK`: array of public user views.
/// - `403 Forbidden`: the caller is not an admin.
#[get("")]
pub async fn list_users(
    store: web::Data<dyn UserStore>,
    principal: Principal,
) -> Result<impl Responder, AppError> {
    require_admin(&principal)?;

    let users = store.list_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Creates a user account on someone's behalf. Admin only.
///
/// Same semantics as self-registration: the password is hashed before
/// persistence and a duplicate email is a 409.
#[post("")]
pub async fn create_user(
    service: web::Data<AuthService>,
    principal: Principal,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    require_admin(&principal)?;
    body.validate()?;

    let user = service.register(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Retrieves a user record. Admins may read anyone; users only themselves.
///
/// ## Responses:
/// - `200 OK` | `403 Forbidden` | `404 Not Found` (absence wins over the
///   ownership check, as for tasks).
#[get("/{id}")]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    principal: Principal,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user = load_guarded(&store, *user_id, &principal, Operation::Read).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Updates a user record. Admins may update anyone; users only themselves.
///
/// Absent fields are left untouched. A provided password is re-hashed. Role
/// changes are an admin-only action: a user cannot change their own role.
/// An email change re-checks uniqueness.
#[put("/{id}")]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    principal: Principal,
    user_id: web::Path<i32>,
    body: web::Json<UserUpdateRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let mut user = load_guarded(&store, *user_id, &principal, Operation::Update).await?;
    let input = body.into_inner();

    if let Some(role) = input.role {
        if role != user.role && !principal.is_admin() {
            return Err(AppError::Forbidden("only admins may change roles".into()));
        }
        user.role = role;
    }
    if let Some(email) = input.email {
        if email != user.email && store.exists_by_email(&email).await? {
            return Err(AppError::Conflict(format!("email already registered: {}", email)));
        }
        user.email = email;
    }
    if let Some(full_name) = input.full_name {
        user.full_name = full_name;
    }
    if let Some(password) = input.password {
        user.password_hash = hash_password(&password)?;
    }
    user.updated_at = Utc::now();

    let updated = store.update(&user).await?;
    log::info!("user updated: id={}", updated.id);

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// Deletes a user and every task they own. Admin only.
///
/// ## Responses:
/// - `204 No Content` | `403 Forbidden` | `404 Not Found`.
#[delete("/{id}")]
pub async fn delete_user(
    users: web::Data<dyn UserStore>,
    tasks: web::Data<dyn TaskStore>,
    principal: Principal,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    require_admin(&principal)?;

    let id = *user_id;
    if users.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("user not found: {}", id)));
    }

    let removed_tasks = tasks.delete_by_owner(id).await?;
    users.delete_by_id(id).await?;
    log::info!("user deleted: id={}, cascaded tasks={}", id, removed_tasks);

    Ok(HttpResponse::NoContent().finish())
}

fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin access required".into()))
    }
}

// Not-found wins, same ordering as the task guard, so the two resource types
// do not leak existence differently.
async fn load_guarded(
    store: &web::Data<dyn UserStore>,
    id: i32,
    principal: &Principal,
    operation: Operation,
) -> Result<User, AppError> {
    let user = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {}", id)))?;

    if !can_access(principal, user.id, operation) {
        log::warn!(
            "access denied: user {} on user record {}",
            principal.user_id,
            id
        );
        return Err(AppError::Forbidden("no access to this user".into()));
    }

    Ok(user)
}

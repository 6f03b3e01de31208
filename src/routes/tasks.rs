use crate::{
    auth::Principal,
    error::AppError,
    models::{PageParams, TaskInput, TaskQuery, TaskStatus},
    tasks::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves a page of tasks visible to the authenticated caller.
///
/// Non-admin callers only ever receive their own tasks; the constraint is
/// part of the store query, not an after-the-fact filter. Admin callers see
/// every user's tasks. Results are ordered by creation date, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): `PENDING`, `IN_PROGRESS`, or `COMPLETED`,
///   case-insensitive.
/// - `page` (optional): zero-based page number, default 0.
/// - `size` (optional): page size, default 20, at most 100.
///
/// ## Responses:
/// - `200 OK`: a page object `{items, page, size, total_items, total_pages}`.
/// - `400 Bad Request`: unknown status literal.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    principal: Principal,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<TaskStatus>)
        .transpose()?;
    let page = PageParams::new(query.page, query.size);

    let tasks = service.list(&principal, status, page).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated caller.
///
/// The owner is always the caller; any owner field in the payload is
/// ignored. An absent status defaults to `PENDING`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: validation failure.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    principal: Principal,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = service.create(body.into_inner(), &principal).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: the task exists but belongs to someone else and the
///   caller is not an admin.
/// - `404 Not Found`: no task with this id. Absence wins over the ownership
///   check, so probing a nonexistent id yields 404, not 403.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = service.find_by_id(task_id.into_inner(), &principal).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task.
///
/// Title, description, and deadline are overwritten from the payload; status
/// only when present. The owner never changes.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: validation failure.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden` / `404 Not Found`: as for `GET /tasks/{id}`.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<Uuid>,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = service
        .update(task_id.into_inner(), body.into_inner(), &principal)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden` / `404 Not Found`: as for `GET /tasks/{id}`.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    principal: Principal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    service.delete(task_id.into_inner(), &principal).await?;

    Ok(HttpResponse::NoContent().finish())
}

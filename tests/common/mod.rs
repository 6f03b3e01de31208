//! Shared fixtures for the integration tests: in-memory store
//! implementations and helpers to assemble the app and drive the auth flow.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use taskhub::auth::{AuthService, TokenCodec, TokenResponse};
use taskhub::error::AppError;
use taskhub::models::{NewUser, Page, PageParams, Task, TaskStatus, User, UserResponse};
use taskhub::store::{TaskStore, UserStore};
use taskhub::tasks::TaskService;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-32-bytes!";

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email == email))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict("record already exists".into()));
        }
        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new.email,
            password_hash: new.password_hash,
            full_name: new.full_name,
            role: new.role,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound("record not found".into()))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.clone())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    fn page_of(
        &self,
        owner_id: Option<i32>,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Page<Task> {
        let tasks = self.tasks.lock().unwrap();
        let mut matching: Vec<Task> = tasks
            .iter()
            .filter(|t| owner_id.map_or(true, |owner| t.owner_id == owner))
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();
        Page::new(items, page, total)
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| AppError::NotFound("record not found".into()))?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: uuid::Uuid) -> Result<bool, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }

    async fn list_by_owner(
        &self,
        owner_id: i32,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        Ok(self.page_of(Some(owner_id), status, page))
    }

    async fn list_all(
        &self,
        status: Option<TaskStatus>,
        page: PageParams,
    ) -> Result<Page<Task>, AppError> {
        Ok(self.page_of(None, status, page))
    }

    async fn delete_by_owner(&self, owner_id: i32) -> Result<u64, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.owner_id != owner_id);
        Ok((before - tasks.len()) as u64)
    }
}

/// Everything the app factory needs, wired against in-memory stores.
#[derive(Clone)]
pub struct TestState {
    pub codec: TokenCodec,
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub auth_service: AuthService,
    pub task_service: TaskService,
}

impl TestState {
    pub fn new() -> Self {
        let codec = TokenCodec::new(TEST_SECRET);
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::default());
        let tasks: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::default());
        let auth_service = AuthService::new(users.clone(), codec.clone());
        let task_service = TaskService::new(tasks.clone());
        Self {
            codec,
            users,
            tasks,
            auth_service,
            task_service,
        }
    }

    /// Registers the app data the handlers, middleware, and extractors pull
    /// out of the request. Mirrors the wiring in `main.rs`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.codec.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.tasks.clone()))
            .app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.task_service.clone()));
    }
}

pub async fn register_user<S, B>(
    app: &S,
    email: &str,
    full_name: &str,
    password: &str,
    role: Option<&str>,
) -> UserResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut payload = json!({
        "email": email,
        "full_name": full_name,
        "password": password,
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "registration of {} failed. Body: {:?}",
        email,
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("failed to parse registration response")
}

pub async fn login_user<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::OK,
        "login of {} failed. Body: {:?}",
        email,
        String::from_utf8_lossy(&body)
    );
    let token_response: TokenResponse =
        serde_json::from_slice(&body).expect("failed to parse login response");
    assert!(!token_response.token.is_empty());
    token_response.token
}

/// Register + login in one go, returning the public user and a session token.
pub async fn register_and_login<S, B>(
    app: &S,
    email: &str,
    full_name: &str,
    password: &str,
    role: Option<&str>,
) -> (UserResponse, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let user = register_user(app, email, full_name, password, role).await;
    let token = login_user(app, email, password).await;
    (user, token)
}

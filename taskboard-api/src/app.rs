/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::db::memory::MemoryStore;
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = taskboard_api::app::build_router(state);
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use taskboard_shared::db::DocumentStore;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The store
/// is built once at startup and shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Document store
    pub store: Arc<dyn DocumentStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Borrowed store handle for model calls
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// GET    /health
/// POST   /registro                   register
/// POST   /login                      login
/// POST   /registerTask               create personal task
/// GET    /tasks                      personal tasks of the header identity
/// DELETE /tasks/:id                  delete personal task
/// PUT    /updateTask/:id             update personal task
/// GET    /users                      list users
/// PUT    /users/:userId              change role
/// PUT    /groupChange/:userId        change group
/// GET    /usersByGroup?groupId=      users of a group
/// POST   /groups                     create group
/// GET    /groups                     list groups
/// POST   /assignedTask               assign a group task
/// GET    /groupTasks                 group tasks of the header identity
/// PUT    /updateTaskStatus/:taskId   change group task status
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/registro", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/registerTask", post(routes::tasks::create_task))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/updateTask/:id", put(routes::tasks::update_task))
        .route("/users", get(routes::users::list_users))
        .route("/users/:user_id", put(routes::users::change_role))
        .route("/groupChange/:user_id", put(routes::users::change_group))
        .route("/usersByGroup", get(routes::users::list_users_by_group))
        .route(
            "/groups",
            post(routes::groups::create_group).get(routes::groups::list_groups),
        )
        .route("/assignedTask", post(routes::group_tasks::assign_task))
        .route("/groupTasks", get(routes::group_tasks::list_group_tasks))
        .route(
            "/updateTaskStatus/:task_id",
            put(routes::group_tasks::update_task_status),
        )
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

//! HTTP surface over the [`Coordinator`].

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{
    agents::{Coordinator, TaskOutcome},
    error::{Error, Result},
    shared::AppConfig,
};

pub const SERVICE_NAME: &str = "AI Operations Assistant";

pub const EXAMPLE_TASK: &str = "Find the top 5 Python repositories on GitHub with the most stars \
and get the current weather in San Francisco";

#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<Coordinator>,
}

#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub task: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub fn router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/process-task", post(process_task))
        .with_state(AppState { coordinator })
}

/// Builds the coordinator from `config` and serves until the listener fails.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let coordinator = Arc::new(Coordinator::from_config(config)?);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("failed to bind {addr}: {e}")))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router(coordinator)).await?;
    Ok(())
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "process_task": "/process-task (POST)"
        },
        "example_task": EXAMPLE_TASK
    }))
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let status = if state.coordinator.is_healthy() {
        "healthy"
    } else {
        "degraded"
    };
    Json(json!({
        "status": status,
        "service": SERVICE_NAME,
        "components": state.coordinator.status()
    }))
}

/// POST /process-task
async fn process_task(
    State(state): State<AppState>,
    Json(request): Json<TaskRequest>,
) -> std::result::Result<Json<TaskOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let task = request.task.trim();
    if task.is_empty() {
        warn!("Rejected empty task");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "empty_task".to_string(),
                message: "Field 'task' must not be empty".to_string(),
            }),
        ));
    }

    info!(task, "Received task");
    Ok(Json(state.coordinator.process(task).await))
}

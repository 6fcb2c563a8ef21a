use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use kidboard_core::{AutomationsSummary, WorkspaceSnapshot};
use kidboard_derive::{build_automations, fallback_snapshot, SnapshotBuilder};
use kidboard_store::WorkspaceConfig;

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 7878,
        }
    }
}

// ── App State ──

struct AppState {
    config: WorkspaceConfig,
}

// ── Error Handling ──

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ── Entrypoint ──

pub async fn serve(config: WorkspaceConfig, serve: ServeConfig) -> anyhow::Result<()> {
    if !config.project_root.is_dir() {
        anyhow::bail!(
            "project directory not found: {}",
            config.project_root.display()
        );
    }
    let workspace_root = config.workspace_root.clone();
    let app = router(config);

    let addr = format!("{}:{}", serve.bind, serve.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, workspace = %workspace_root.display(), "kidboard listening");
    eprintln!("kidboard HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(config: WorkspaceConfig) -> Router {
    let state = Arc::new(AppState { config });
    Router::new()
        .route("/api/health", get(health))
        .route("/api/workspace", get(get_workspace))
        .route("/api/live-automations", get(get_live_automations))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// ── GET /api/workspace ──

async fn get_workspace(State(state): State<Arc<AppState>>) -> Json<WorkspaceSnapshot> {
    let config = state.config.clone();
    let built = tokio::task::spawn_blocking(move || SnapshotBuilder::new(config).build()).await;
    match built {
        Ok(snapshot) => Json(snapshot),
        Err(e) => {
            tracing::warn!(error = %e, "snapshot build failed, serving fallback");
            Json(fallback_snapshot())
        }
    }
}

// ── GET /api/live-automations ──

async fn get_live_automations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AutomationsSummary>, AppError> {
    let config = state.config.clone();
    let summary = tokio::task::spawn_blocking(move || build_automations(&config)).await?;
    Ok(Json(summary))
}

// ── Tests ──

// In crates/web-server/src/lib.rs

use app_config::types::ServerSettings;
use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use engine::Engine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use types::{format_timestamp, RunResponse, SnapshotResponse};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    /// Held for the duration of a cycle. A trigger that cannot take it is
    /// rejected rather than queued.
    pub cycle_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            cycle_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/", get(snapshot_handler))
        .route("/run", get(run_handler).post(run_handler))
        .route("/health", get(health_check_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`: the current ledger as stored.
async fn snapshot_handler(State(state): State<AppState>) -> Result<Json<SnapshotResponse>> {
    let ledger = state.engine.snapshot().await?;
    Ok(Json(SnapshotResponse {
        ledger,
        server_time: format_timestamp(Utc::now()),
    }))
}

/// The handler for `GET|POST /run`: one full evaluation cycle.
async fn run_handler(State(state): State<AppState>) -> Result<Json<RunResponse>> {
    let _guard = state.cycle_lock.try_lock().map_err(|_| {
        tracing::warn!("Cycle trigger rejected, another cycle is in flight.");
        Error::CycleInProgress
    })?;

    let report = state.engine.run_cycle().await?;
    Ok(Json(RunResponse {
        status: "success",
        message: report.summary(),
        timestamp: format_timestamp(report.finished_at),
        report,
    }))
}

/// The main entry point for running the web server.
///
/// Serves until the process is terminated.
pub async fn run(settings: &ServerSettings, engine: Arc<Engine>) -> Result<()> {
    let app = create_router(AppState::new(engine));

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::StaticFeed;
    use app_config::{InstrumentConfig, Settings};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use database::{MemoryStore, UnavailableStore};
    use serde_json::Value;
    use tower::ServiceExt;

    fn engine_with(store: Arc<dyn database::StateStore>) -> Arc<Engine> {
        let settings = Settings::with_instruments(vec![InstrumentConfig::new("WDC", 50, 20)]);
        Arc::new(Engine::new(settings, Arc::new(StaticFeed::new()), store).unwrap())
    }

    async fn call(state: AppState, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ));
        (status, body)
    }

    #[tokio::test]
    async fn health_check() {
        let state = AppState::new(engine_with(Arc::new(MemoryStore::new())));
        let (status, body) = call(state, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn run_reports_a_summary_and_persists() {
        let state = AppState::new(engine_with(Arc::new(MemoryStore::new())));

        let (status, body) = call(state.clone(), "POST", "/run").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(body["message"].as_str().unwrap().starts_with("Logic Executed Successfully"));
        assert_eq!(body["timestamp"].as_str().unwrap().len(), "2024-01-01 00:00:00".len());
        assert_eq!(body["report"]["instruments"][0]["outcome"], "skipped");

        let (status, body) = call(state, "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cash"], "100000");
        assert_eq!(body["positions"]["WDC"]["status"], "NEUTRAL");
        assert!(body["logs"].as_array().unwrap().is_empty());
        assert!(body["server_time"].is_string());
    }

    #[tokio::test]
    async fn overlapping_trigger_is_rejected() {
        let state = AppState::new(engine_with(Arc::new(MemoryStore::new())));
        let _running = state.cycle_lock.clone().try_lock_owned().unwrap();

        let (status, body) = call(state, "GET", "/run").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn missing_persistence_is_an_error_response() {
        let state = AppState::new(engine_with(Arc::new(UnavailableStore::new("storage.url is not set"))));

        let (status, body) = call(state.clone(), "GET", "/run").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("storage.url is not set"));

        let (status, _) = call(state, "GET", "/").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

//! Localnet service - HTTP JSON-RPC server hosting the supercollab program.

use crate::bank::Bank;
use crate::domain::config::LocalnetConfig;
use crate::domain::error::{ApiError, LocalnetError};
use crate::domain::ledger::{LocalnetStats, StatsSnapshot};
use crate::router::{route_method, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use sc_01_projects::prelude::ProjectProgram;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Localnet service state
pub struct LocalnetService {
    config: LocalnetConfig,
    bank: Arc<RwLock<Bank>>,
    stats: Arc<LocalnetStats>,
}

impl LocalnetService {
    /// Create a localnet with the supercollab program deployed.
    pub fn new(config: LocalnetConfig) -> Result<Self, LocalnetError> {
        config.validate()?;

        let mut bank = Bank::new();
        bank.register_program(Arc::new(ProjectProgram::new()));

        Ok(Self {
            config,
            bank: Arc::new(RwLock::new(bank)),
            stats: Arc::new(LocalnetStats::new()),
        })
    }

    pub fn config(&self) -> &LocalnetConfig {
        &self.config
    }

    pub fn bank(&self) -> Arc<RwLock<Bank>> {
        Arc::clone(&self.bank)
    }

    pub fn stats(&self) -> Arc<LocalnetStats> {
        Arc::clone(&self.stats)
    }

    /// Build HTTP router for JSON-RPC
    pub fn router(&self) -> Router {
        let state = AppState {
            bank: Arc::clone(&self.bank),
            stats: Arc::clone(&self.stats),
            max_batch_size: self.config.limits.max_batch_size,
        };

        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .layer(RequestBodyLimitLayer::new(self.config.limits.max_request_size))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Binds the listener, writes the IDL and serves in the background.
    ///
    /// With `rpc.port = 0` the OS picks a port; the handle reports it.
    pub async fn spawn(self) -> Result<LocalnetHandle, LocalnetError> {
        if let Some(dir) = &self.config.idl_dir {
            let path = write_idl(dir)?;
            info!(path = %path.display(), "IDL written");
        }

        let listener = tokio::net::TcpListener::bind(self.config.rpc_addr())
            .await
            .map_err(LocalnetError::Bind)?;
        let addr = listener.local_addr().map_err(LocalnetError::Bind)?;

        let router = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    // A dropped sender also stops the server.
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!(addr = %addr, "localnet RPC listening");

        Ok(LocalnetHandle {
            addr,
            bank: self.bank,
            stats: self.stats,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }
}

/// A running localnet. Dropping the handle stops the server.
pub struct LocalnetHandle {
    addr: SocketAddr,
    bank: Arc<RwLock<Bank>>,
    stats: Arc<LocalnetStats>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl LocalnetHandle {
    /// Bound address.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// RPC endpoint URL.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn bank(&self) -> Arc<RwLock<Bank>> {
        Arc::clone(&self.bank)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Stops accepting requests and waits for the server to finish.
    pub async fn shutdown(mut self) -> Result<(), LocalnetError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match (&mut self.task).await {
            Ok(Ok(())) => {
                info!("localnet stopped");
                Ok(())
            }
            Ok(Err(e)) => Err(LocalnetError::Server(e.to_string())),
            Err(e) => Err(LocalnetError::Server(e.to_string())),
        }
    }
}

/// Writes `<dir>/<program>.json`, creating `dir` if needed.
pub fn write_idl(dir: &Path) -> Result<PathBuf, LocalnetError> {
    let idl = sc_01_projects::idl::idl();
    let path = dir.join(format!("{}.json", idl.name()));
    let to_error = |reason: String| LocalnetError::IdlWrite {
        path: path.display().to_string(),
        reason,
    };

    let text = idl.to_json_pretty().map_err(|e| to_error(e.to_string()))?;
    std::fs::create_dir_all(dir).map_err(|e| to_error(e.to_string()))?;
    std::fs::write(&path, text).map_err(|e| to_error(e.to_string()))?;
    Ok(path)
}

/// Handle JSON-RPC request
async fn handle_json_rpc(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(error_response(Value::Null, &ApiError::parse_error(e.to_string()))),
            );
        }
    };

    let response = match request {
        Value::Array(requests) => {
            if requests.is_empty() {
                error_response(Value::Null, &ApiError::invalid_request("empty batch"))
            } else if requests.len() > state.max_batch_size {
                error_response(
                    Value::Null,
                    &ApiError::limit_exceeded(format!(
                        "batch of {} exceeds max {}",
                        requests.len(),
                        state.max_batch_size
                    )),
                )
            } else {
                Value::Array(
                    requests
                        .iter()
                        .map(|req| process_single_request(&state, req))
                        .collect(),
                )
            }
        }
        single => process_single_request(&state, &single),
    };

    (StatusCode::OK, Json(response))
}

/// Process a single JSON-RPC request
fn process_single_request(state: &AppState, request: &Value) -> Value {
    state.stats.record_request();

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    if !(id.is_string() || id.is_number()) {
        return error_response(
            Value::Null,
            &ApiError::invalid_request("id must be string or number"),
        );
    }

    if request.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return error_response(id, &ApiError::invalid_request("jsonrpc must be \"2.0\""));
    }

    let Some(method) = request.get("method").and_then(Value::as_str) else {
        return error_response(id, &ApiError::invalid_request("missing method"));
    };
    let params = request.get("params");

    match route_method(state, method, params) {
        Ok(result) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        }),
        Err(e) => {
            if e.code != crate::domain::error::codes::TRANSACTION_SIMULATION_FAILED {
                warn!(method, code = e.code, message = %e.message, "request failed");
            }
            error_response(id, &e)
        }
    }
}

fn error_response(id: Value, error: &ApiError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error,
    })
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "localnet",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

//! HTTP transport for the bank directory.
//!
//! ## Endpoints
//!
//! - `GET    /v1/swift-codes/:swift_code`           - bank, or headquarters with branches
//! - `GET    /v1/swift-codes/country/:country_iso2` - every bank of a country
//! - `POST   /v1/swift-codes`                       - register a bank
//! - `DELETE /v1/swift-codes/:swift_code`           - remove a bank
//!
//! Anything else, including a known path with another method, is a 404
//! `{"error": "Wrong path"}`.

mod error;
mod swift_code_routes;

pub use error::ApiError;

use crate::{
    directory::BankDirectory,
    error::{DirectoryError, DirectoryResult},
};
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};

/// Shared handler state. The directory (and its single connection) is
/// handed to one request at a time.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<Mutex<BankDirectory>>,
}

impl AppState {
    pub fn new(directory: BankDirectory) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
        }
    }

    /// Run `f` against the directory on the blocking pool. The guard is
    /// released when `f` returns, whatever the outcome. A panic inside `f`
    /// surfaces as [`DirectoryError::Unavailable`] for that call only.
    pub async fn with_directory<T, F>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&BankDirectory) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let directory = Arc::clone(&self.directory);
        tokio::task::spawn_blocking(move || {
            // A panic in an earlier task leaves the connection usable:
            // open transactions roll back when dropped during unwinding.
            let guard = directory.lock().unwrap_or_else(PoisonError::into_inner);
            f(&*guard)
        })
        .await
        .map_err(|e| DirectoryError::Unavailable(e.to_string()))?
    }
}

/// Build the full router with every route, the request log and the
/// wrong-path fallback. Each route also answers unregistered methods with
/// the wrong-path response instead of a 405.
pub fn swift_code_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/swift-codes",
            post(swift_code_routes::register_bank).fallback(wrong_path),
        )
        .route(
            "/v1/swift-codes/country/:country_iso2",
            get(swift_code_routes::banks_by_country).fallback(wrong_path),
        )
        .route(
            "/v1/swift-codes/:swift_code",
            get(swift_code_routes::bank_by_code)
                .delete(swift_code_routes::remove_bank)
                .fallback(wrong_path),
        )
        .fallback(wrong_path)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn wrong_path() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Wrong path" }))).into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{method} {path} -> {} ({} ms)",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

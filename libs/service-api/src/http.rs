use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::any;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::ServeError;
use crate::types::{StatusResponse, rfc3339_now};

// ═══════════════════════════════════════════════════════════════
//  ServiceIdentity, общее для producer и consumer
// ═══════════════════════════════════════════════════════════════

/// Что сервис отвечает на `GET /`: строка статуса и hostname процесса.
#[derive(Clone, Debug)]
pub struct ServiceIdentity {
    status: Arc<str>,
    hostname: Arc<str>,
}

impl ServiceIdentity {
    pub fn new(status: impl Into<Arc<str>>, hostname: impl Into<Arc<str>>) -> Self {
        Self {
            status: status.into(),
            hostname: hostname.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn status_response(&self) -> StatusResponse {
        StatusResponse {
            status: self.status.to_string(),
            hostname: self.hostname.to_string(),
            timestamp: rfc3339_now(),
        }
    }
}

/// Hostname процесса; `"unknown"`, если определить не удалось.
pub fn resolve_hostname() -> String {
    gethostname::gethostname()
        .into_string()
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".into())
}

// ═══════════════════════════════════════════════════════════════
//  Routes: GET /, GET /health, fallback
// ═══════════════════════════════════════════════════════════════

/// `/` и `/health` плюс fallback: любой несматченный путь отдаёт
/// тот же payload, что и `/`. Мержится в роутер сервиса.
pub fn identity_routes(identity: ServiceIdentity) -> Router {
    Router::new()
        .route("/", any(handle_status))
        .route("/health", any(handle_health))
        .fallback(handle_status)
        .with_state(identity)
}

async fn handle_status(State(identity): State<ServiceIdentity>) -> impl IntoResponse {
    axum::Json(identity.status_response())
}

async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ═══════════════════════════════════════════════════════════════
//  Listener + serve
// ═══════════════════════════════════════════════════════════════

pub async fn bind(addr: &str) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr).await.map_err(|source| ServeError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Обслуживать `app` до отмены `shutdown`; in-flight запросы дорабатывают.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::debug!(%addr, "http listener ready");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(ServeError::Serve)
}

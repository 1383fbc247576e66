use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{any, post};

use service_api::{ApiError, FetchResponse, NewMessage, ServiceIdentity, identity_routes, rfc3339_now};

use crate::client::ProducerClient;

pub const STATUS: &str = "Consumer service running";

#[derive(Clone)]
struct AppState {
    client: ProducerClient,
    identity: ServiceIdentity,
}

/// Relay-роуты + общие `/`, `/health`.
pub fn router(client: ProducerClient, identity: ServiceIdentity) -> Router {
    Router::new()
        .route("/fetch-messages", any(handle_fetch_messages))
        .route(
            "/create-message",
            post(handle_create_message).fallback(handle_method_not_allowed),
        )
        .with_state(AppState {
            client,
            identity: identity.clone(),
        })
        .merge(identity_routes(identity))
}

// --- REST: GET /fetch-messages ---

async fn handle_fetch_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = state.client.fetch_messages().await.map_err(|e| {
        tracing::warn!(producer = %state.client.host(), error = %e, "fetch messages failed");
        ApiError::Internal(format!("Error fetching messages: {e}"))
    })?;

    Ok(axum::Json(FetchResponse {
        consumer_hostname: state.identity.hostname().to_string(),
        timestamp: rfc3339_now(),
        messages,
    }))
}

// --- REST: POST /create-message ---

async fn handle_create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let draft = NewMessage::from_json(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let created = state.client.create_message(&draft).await.map_err(|e| {
        tracing::warn!(producer = %state.client.host(), error = %e, "create message failed");
        ApiError::Internal(format!("Error creating message: {e}"))
    })?;

    Ok((StatusCode::CREATED, axum::Json(created)))
}

async fn handle_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use service_api::{ApiError, NewMessage, ServiceIdentity, identity_routes};

use crate::store::MessageStore;

pub const STATUS: &str = "Producer service running";

#[derive(Clone)]
struct AppState {
    store: Arc<MessageStore>,
}

/// `/messages` + общие `/`, `/health`.
pub fn router(store: Arc<MessageStore>, identity: ServiceIdentity) -> Router {
    Router::new()
        .route("/messages", get(handle_list_messages).post(handle_create_message))
        .with_state(AppState { store })
        .merge(identity_routes(identity))
}

// --- REST: GET /messages ---

async fn handle_list_messages(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.store.list().await)
}

// --- REST: POST /messages ---

async fn handle_create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let draft = NewMessage::from_json(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let message = state.store.append(draft).await;
    tracing::info!(id = %message.id, "new message created");

    Ok((StatusCode::CREATED, axum::Json(message)))
}

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::ServerState;

/// Serve the persisted snapshot verbatim. A missing or corrupt file
/// comes back as `{}`, never as an error.
pub(crate) async fn bestsellers_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.store.read())
}

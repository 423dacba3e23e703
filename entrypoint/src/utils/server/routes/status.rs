use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::server::ServerState;

#[derive(Serialize, Debug)]
struct ParserStatus {
    is_running: bool,
    last_updated: Option<String>,
}

pub(crate) async fn status_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(ParserStatus {
        is_running: state.coordinator.is_running(),
        last_updated: state.store.last_updated(),
    })
}

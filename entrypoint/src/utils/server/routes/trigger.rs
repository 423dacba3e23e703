use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::server::ServerState;

#[derive(Serialize, Debug)]
struct TriggerResponse {
    status: &'static str,
    message: &'static str,
}

pub(crate) async fn trigger_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if !state.coordinator.try_begin() {
        return (
            StatusCode::CONFLICT,
            Json(TriggerResponse {
                status: "busy",
                message: "A scrape run is already in progress. Try again later.",
            }),
        );
    }

    info!("Manual trigger accepted, starting background run");

    // detached on purpose: there is no result channel back to this
    // request, progress is observable through /api/parser-status
    let task_state = state.clone();
    tokio::spawn(async move {
        match task_state.runner.run().await {
            Ok(summary) => info!(
                "Triggered run finished: {} categories, {} products",
                summary.categories, summary.products
            ),
            Err(err) => error!("Triggered run failed: {}", err),
        }

        task_state.coordinator.finish();
    });

    (
        StatusCode::OK,
        Json(TriggerResponse {
            status: "accepted",
            message: "Scrape run started in the background.",
        }),
    )
}

pub mod routes;
pub mod scheduler;
pub(crate) mod service_layers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use snapshot_store::{legacy::LegacyStore, store::SnapshotStore};

use crate::{runner::ScrapeRunner, state::RunCoordinator};

pub struct ServerState {
    pub coordinator: RunCoordinator,
    pub store: SnapshotStore,
    pub legacy_store: LegacyStore,
    pub runner: ScrapeRunner,
}

pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/bestsellers", get(routes::bestsellers::bestsellers_handler))
        .route("/api/trigger-parser", post(routes::trigger::trigger_handler))
        .route("/api/parser-status", get(routes::status::status_handler))
        .route("/items", get(routes::items::items_handler))
        .layer(service_layers::build_service_layers())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use tempfile::{TempDir, tempdir};
    use tower::util::ServiceExt;

    use common::record::ProductRecord;
    use common::snapshot::Snapshot;
    use crawler::{
        errors::CrawlerError,
        traits::{FetchOptions, PageFetcher},
    };

    use crate::catalog::CatalogSource;

    /// Never resolves quickly, so a triggered run stays "running" for
    /// the remainder of the test.
    struct StalledFetcher;

    #[async_trait]
    impl PageFetcher for StalledFetcher {
        async fn fetch_page(
            &self,
            _url: &str,
            _options: FetchOptions<'_>,
        ) -> Result<String, CrawlerError> {
            tokio::time::sleep(std::time::Duration::from_secs(600)).await;

            Err(CrawlerError::RemoteRenderFailed {
                status: 504,
                body: "stalled".into(),
            })
        }
    }

    fn test_state(dir: &TempDir) -> Arc<ServerState> {
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        let legacy_store = LegacyStore::new(dir.path().join("data.json"));
        let runner = ScrapeRunner::new(
            Box::new(StalledFetcher),
            CatalogSource::Fixed,
            store.clone(),
        );

        Arc::new(ServerState {
            coordinator: RunCoordinator::new(),
            store,
            legacy_store,
            runner,
        })
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bestsellers_serves_empty_object_without_snapshot() {
        let dir = tempdir().unwrap();
        let router = build_router(test_state(&dir));

        let (status, body) = get_json(router, "/api/bestsellers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn bestsellers_round_trips_written_snapshot() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "Best Sellers in Electronics",
            vec![
                ProductRecord::new("#1", "Cable").with_price("$9.99"),
                ProductRecord::new("#2", "Charger"),
            ],
        );
        snapshot.insert("Best Sellers in Automotive", vec![ProductRecord::new("#1", "Wax")]);
        state.store.write(&snapshot).unwrap();

        let (status, body) = get_json(build_router(state), "/api/bestsellers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(&snapshot).unwrap());

        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["Best Sellers in Electronics", "Best Sellers in Automotive"]);
        assert_eq!(body["Best Sellers in Electronics"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn status_reports_missing_file_as_null() {
        let dir = tempdir().unwrap();
        let router = build_router(test_state(&dir));

        let (status, body) = get_json(router, "/api/parser-status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_running"], false);
        assert_eq!(body["last_updated"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn trigger_while_busy_returns_conflict() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        assert!(state.coordinator.try_begin());

        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/trigger-parser")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn trigger_accepts_then_refuses_second_start() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let first = build_router(state.clone())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/trigger-parser")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        // the stalled fetcher keeps the run in flight
        assert!(state.coordinator.is_running());

        let second = build_router(state)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/trigger-parser")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn items_filters_by_rating_and_price() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        state
            .legacy_store
            .write_items(&[
                ProductRecord::new("1", "Drill")
                    .with_rating("4.7 out of 5 stars")
                    .with_price("$99.00"),
                ProductRecord::new("2", "Saw")
                    .with_rating("3.9 out of 5 stars")
                    .with_price("$49.00"),
                ProductRecord::new("3", "Mystery box")
                    .with_rating("N/A")
                    .with_price("N/A"),
            ])
            .unwrap();

        let (status, body) = get_json(build_router(state.clone()), "/items?min_rating=4.0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["title"], "Drill");

        let (_, body) = get_json(build_router(state.clone()), "/items?max_price=60.00").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["title"], "Saw");

        let (_, body) = get_json(build_router(state), "/items").await;
        assert_eq!(body["count"], 3);
    }

    #[tokio::test]
    async fn items_rejects_garbage_thresholds() {
        let dir = tempdir().unwrap();
        let router = build_router(test_state(&dir));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/items?min_rating=spicy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

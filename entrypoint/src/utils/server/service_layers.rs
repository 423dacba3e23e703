use axum::http::Method;
use tower::{
    ServiceBuilder,
    layer::util::{Identity, Stack},
};
use tower_http::cors::{Any, CorsLayer};

pub(crate) fn build_service_layers() -> ServiceBuilder<Stack<CorsLayer, Identity>> {
    // the dashboard frontend is served from wherever, so any origin goes
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    ServiceBuilder::new().layer(cors_layer)
}

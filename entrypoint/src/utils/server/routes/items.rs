use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use common::record::ProductRecord;
use extractor::price::parse_money;

use crate::server::{ServerState, routes::error_message_erasure::ApiError};

#[derive(Deserialize, Debug)]
pub(crate) struct ItemsQuery {
    min_rating: Option<f64>,
    max_price: Option<f64>,
}

#[derive(Serialize, Debug)]
struct ItemsResponse {
    count: usize,
    items: Vec<ProductRecord>,
}

/// Legacy filtered view over the flat product list. Records whose
/// rating or price doesn't parse are excluded by the matching filter.
pub(crate) async fn items_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Query(query), _): WithRejection<Query<ItemsQuery>, ApiError>,
) -> impl IntoResponse {
    let mut items = state.legacy_store.read_items();

    if let Some(min_rating) = query.min_rating {
        items.retain(|item| rating_value(&item.rating).is_some_and(|rating| rating >= min_rating));
    }

    if let Some(max_price) = query.max_price {
        items.retain(|item| parse_money(&item.price).is_some_and(|price| price <= max_price));
    }

    Json(ItemsResponse {
        count: items.len(),
        items,
    })
}

/// "4.5 out of 5 stars" -> 4.5
fn rating_value(rating: &str) -> Option<f64> {
    rating.split_whitespace().next()?.parse().ok()
}

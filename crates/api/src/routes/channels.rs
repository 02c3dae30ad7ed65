use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    routes::Pagination,
    state::AppState,
};
use db::models::Category;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/channel/", get(list_channels))
        .route("/channel/{reference}/", get(get_channel))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ChannelListResponse {
    count: i64,
    items: Vec<ChannelListItem>,
}

#[derive(Debug, Serialize)]
struct ChannelListItem {
    name: String,
    reference: String,
}

#[derive(Debug, Serialize)]
struct ChannelDetailResponse {
    name: String,
    reference: String,
    categories: Vec<CategoryItem>,
}

#[derive(Debug, Serialize)]
struct CategoryItem {
    reference: String,
    name: String,
    channel: String,
    parent_reference: Option<String>,
}

async fn list_channels(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<ChannelListResponse>> {
    let (limit, offset) = page.resolve(state.page_size)?;

    let count = db::queries::channels::count(&state.db).await?;
    let channels = db::queries::channels::list(&state.db, limit, offset).await?;

    Ok(Json(ChannelListResponse {
        count,
        items: channels
            .into_iter()
            .map(|channel| ChannelListItem {
                name: channel.name,
                reference: channel.reference,
            })
            .collect(),
    }))
}

async fn get_channel(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> ApiResult<Json<ChannelDetailResponse>> {
    let channel = db::queries::channels::get_by_reference(&state.db, &reference)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("channel {reference}")))?;

    let categories = db::queries::categories::list_for_channel(&state.db, &channel.id).await?;

    Ok(Json(ChannelDetailResponse {
        name: channel.name,
        categories: flatten(&channel.reference, categories),
        reference: channel.reference,
    }))
}

/// Annotates each category with its parent's reference; the whole set is in
/// hand, so the parent lookup is a map probe, not a query.
fn flatten(channel_reference: &str, categories: Vec<Category>) -> Vec<CategoryItem> {
    let reference_by_id: HashMap<String, String> = categories
        .iter()
        .map(|c| (c.id.clone(), c.reference.clone()))
        .collect();

    categories
        .into_iter()
        .map(|category| CategoryItem {
            parent_reference: category
                .parent_id
                .as_ref()
                .and_then(|id| reference_by_id.get(id).cloned()),
            reference: category.reference,
            name: category.name,
            channel: channel_reference.to_string(),
        })
        .collect()
}

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
use catalog::tree::{self, Node, TreeDetail};
use db::models::CategoryListRow;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/category/", get(list_categories))
        .route("/category/{reference}/", get(get_category))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct CategoryListResponse {
    count: i64,
    items: Vec<CategoryListRow>,
}

async fn list_categories(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<CategoryListResponse>> {
    let (limit, offset) = page.resolve(state.page_size)?;

    let count = db::queries::categories::count(&state.db).await?;
    let items = db::queries::categories::list(&state.db, limit, offset).await?;

    Ok(Json(CategoryListResponse { count, items }))
}

async fn get_category(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> ApiResult<Json<TreeDetail>> {
    let category = db::queries::categories::get_by_reference(&state.db, &reference)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category {reference}")))?;

    let channel = db::queries::channels::get_by_id(&state.db, &category.channel_id)
        .await?
        .ok_or(ApiError::Internal)?;

    // One flat fetch of the owning channel's tree; ancestor and descendant
    // recursion happens in memory.
    let nodes: Vec<Node> =
        db::queries::categories::list_for_channel(&state.db, &channel.id)
            .await?
            .into_iter()
            .map(|c| Node {
                id: c.id,
                parent_id: c.parent_id,
                name: c.name,
                reference: c.reference,
            })
            .collect();

    let detail = tree::detail(&channel.reference, &nodes, &reference)?;
    Ok(Json(detail))
}

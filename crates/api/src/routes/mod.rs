pub mod categories;
pub mod channels;
pub mod health;

use axum::Router;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router(state.clone()))
        .merge(channels::router(state.clone()))
        .merge(categories::router(state))
}

/// `limit`/`offset` query params shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Pagination {
    const MAX_LIMIT: i64 = 500;

    /// Resolves the page window, falling back to the configured page size.
    pub(crate) fn resolve(&self, default_limit: i64) -> Result<(i64, i64), ApiError> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit < 1 || limit > Self::MAX_LIMIT {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::BadRequest("offset must not be negative".to_string()));
        }
        Ok((limit, offset))
    }
}

//! Cache maintenance handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Cache refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: usize,
}

/// Reload every stored profile into the cache
pub async fn refresh_cache(State(state): State<AppState>) -> ApiResult<Json<RefreshResponse>> {
    let refreshed = state.cache.refresh_cache().await?;
    Ok(Json(RefreshResponse { refreshed }))
}

/// Drop everything from the cache
pub async fn clear_cache(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.cache.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use dish_search::models::SearchFilter;
use dish_search::{SearchError, SearchReport};

use crate::api::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Optional per-request cap (the configured maximum still applies)
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// POST /api/search - 自然语言搜索，返回菜品ID
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<i64>>>, SearchError> {
    let ids = match req.max_results {
        Some(limit) => state.search.search_food_limit(&req.query, limit).await?,
        None => state.search.search_food(&req.query).await?,
    };
    Ok(Json(ApiResponse::success(ids)))
}

/// POST /api/search/detailed - 带解析结果和菜品详情
pub async fn search_detailed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchReport>>, SearchError> {
    let report = match req.max_results {
        Some(limit) => state.search.search_food_detailed_limit(&req.query, limit).await?,
        None => state.search.search_food_detailed(&req.query).await?,
    };
    Ok(Json(ApiResponse::success(report)))
}

/// POST /api/search/filter - 显式条件搜索
pub async fn search_filter(
    State(state): State<Arc<AppState>>,
    Json(filter): Json<SearchFilter>,
) -> Result<Json<ApiResponse<Vec<i64>>>, SearchError> {
    tracing::debug!("Filter search: {:?}", filter);
    let ids = state.search.search_with_filter(&filter).await?;
    Ok(Json(ApiResponse::success(ids)))
}

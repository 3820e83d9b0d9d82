pub mod dishes;
pub mod search;
pub mod server;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Build all HTTP routes / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        // 搜索API
        .route("/api/search", post(search::search))
        .route("/api/search/detailed", post(search::search_detailed))
        .route("/api/search/filter", post(search::search_filter))
        // 数据浏览API
        .route("/api/dishes", get(dishes::list_dishes))
        .route("/api/dishes/list", get(dishes::list_dish_ids))
        .route("/api/dishes/:id", get(dishes::get_dish))
        .route("/api/restaurants", get(dishes::list_restaurants))
        .route("/api/categories", get(dishes::list_categories))
        .route("/api/stats", get(dishes::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

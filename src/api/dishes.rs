use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use dish_search::models::{CategoryInfo, DatabaseStats, Dish, Ingredient, Restaurant};
use dish_search::SearchError;

use crate::api::ApiResponse;
use crate::state::AppState;

/// 菜品详情（含配料）
#[derive(Debug, Serialize)]
pub struct DishDetail {
    #[serde(flatten)]
    pub dish: Dish,
    pub ingredients: Vec<Ingredient>,
}

/// GET /api/dishes
pub async fn list_dishes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Dish>>>, SearchError> {
    let dishes = state.search.repository().get_all_dishes().await?;
    Ok(Json(ApiResponse::success(dishes)))
}

#[derive(Debug, Serialize)]
pub struct DishIdList {
    pub dish_ids: Vec<i64>,
    pub count: usize,
}

/// GET /api/dishes/list - 全部可用菜品ID
pub async fn list_dish_ids(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DishIdList>>, SearchError> {
    let dish_ids = state.search.repository().list_dish_ids().await?;
    let count = dish_ids.len();
    Ok(Json(ApiResponse::success(DishIdList { dish_ids, count })))
}

/// GET /api/dishes/:id
pub async fn get_dish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DishDetail>>, SearchError> {
    let repo = state.search.repository();
    let dish = repo.get_dish(id).await?;
    let ingredients = repo.get_ingredients(id).await?;
    Ok(Json(ApiResponse::success(DishDetail { dish, ingredients })))
}

/// GET /api/restaurants
pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Restaurant>>>, SearchError> {
    let restaurants = state.search.repository().get_all_restaurants().await?;
    Ok(Json(ApiResponse::success(restaurants)))
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryInfo>>>, SearchError> {
    let categories = state.search.repository().get_categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /api/stats - 数据库统计
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DatabaseStats>>, SearchError> {
    let stats = state.search.repository().get_database_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

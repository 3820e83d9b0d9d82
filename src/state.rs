use chrono::{DateTime, Utc};
use dish_search::FoodSearch;

/// Shared application state / 共享应用状态
pub struct AppState {
    pub search: FoodSearch,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(search: FoodSearch) -> Self {
        Self {
            search,
            started_at: Utc::now(),
        }
    }
}

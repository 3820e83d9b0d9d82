use serde::{Deserialize, Serialize};

/// Dish with its category and restaurant / 菜品（含分类和餐厅信息）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub category_id: i64,
    pub restaurant: String,
    pub restaurant_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryInfo {
    pub id: i64,
    pub name: String,
    pub restaurant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub dish_id: i64,
    pub name: Option<String>,
    pub quantity: f64,
}

/// Row counts / 数据库统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub restaurants: i64,
    pub dishes: i64,
    pub menu_categories: i64,
    pub users: i64,
}

/// Explicit filters for a combined search. Every field is optional; the
/// ones present are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub restaurant: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, val: &str) -> Self {
        self.name = Some(val.to_string());
        self
    }

    pub fn category(mut self, val: &str) -> Self {
        self.category = Some(val.to_string());
        self
    }

    pub fn restaurant(mut self, val: &str) -> Self {
        self.restaurant = Some(val.to_string());
        self
    }

    pub fn min_price(mut self, val: f64) -> Self {
        self.min_price = Some(val);
        self
    }

    pub fn max_price(mut self, val: f64) -> Self {
        self.max_price = Some(val);
        self
    }

    /// True when no predicate would be applied
    pub fn is_empty(&self) -> bool {
        non_blank(&self.name).is_none()
            && non_blank(&self.category).is_none()
            && non_blank(&self.restaurant).is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

/// Blank text filters count as absent / 空白过滤条件视为未设置
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builder() {
        let filter = SearchFilter::new().restaurant("pizza").max_price(1500.0);
        assert_eq!(filter.restaurant.as_deref(), Some("pizza"));
        assert_eq!(filter.max_price, Some(1500.0));
        assert!(filter.name.is_none());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_blank_filter_is_empty() {
        let filter = SearchFilter::new().name("   ").category("");
        assert!(filter.is_empty());
        assert_eq!(non_blank(&Some(" pasta ".to_string())), Some("pasta"));
    }

    #[test]
    fn test_filter_deserializes_partial_json() {
        let filter: SearchFilter = serde_json::from_str(r#"{"category":"Pasta"}"#).unwrap();
        assert_eq!(filter, SearchFilter::new().category("Pasta"));
    }
}

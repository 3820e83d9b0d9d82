//! Food search API / 菜品搜索接口
//!
//! Resolves a parsed intent against the repository: one query per filter,
//! union inside a dimension, intersection across dimensions.

use serde::Serialize;
use std::collections::BTreeSet;

use super::intent::{IntentParser, SearchIntent};
use super::repository::DishRepository;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{Dish, SearchFilter};

/// Detailed search result / 详细搜索结果
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub intent: SearchIntent,
    pub dish_ids: Vec<i64>,
    pub total: usize,
    pub dishes: Vec<Dish>,
}

#[derive(Clone)]
pub struct FoodSearch {
    repo: DishRepository,
    parser: IntentParser,
    max_results: usize,
}

impl FoodSearch {
    /// Build the search API; restaurant names are loaded once so the
    /// parser can recognise them in queries
    pub async fn new(repo: DishRepository, config: &SearchConfig) -> Result<Self> {
        let restaurants = repo.get_all_restaurants().await?;
        let parser = IntentParser::new(config.budget_max_price, config.premium_min_price)
            .with_restaurants(restaurants.iter().map(|r| r.name.as_str()));

        tracing::info!("Food search ready ({} known restaurants)", restaurants.len());

        Ok(Self {
            repo,
            parser,
            max_results: config.max_results,
        })
    }

    pub fn repository(&self) -> &DishRepository {
        &self.repo
    }

    pub fn parse(&self, query: &str) -> SearchIntent {
        self.parser.parse(query)
    }

    /// Dish IDs matching a free-text query, ascending / 搜索菜品ID
    pub async fn search_food(&self, query: &str) -> Result<Vec<i64>> {
        self.search_food_limit(query, self.max_results).await
    }

    /// search_food with a per-call cap, never above the configured maximum
    pub async fn search_food_limit(&self, query: &str, limit: usize) -> Result<Vec<i64>> {
        let intent = self.parse(query);
        let ids = self.resolve_top(&intent, limit.min(self.max_results)).await?;
        tracing::info!("search_food {:?} -> {} dishes", query, ids.len());
        Ok(ids)
    }

    /// Same as search_food, encoded as a JSON array / 返回JSON数组
    pub async fn search_food_json(&self, query: &str) -> Result<String> {
        let ids = self.search_food(query).await?;
        Ok(serde_json::to_string(&ids)?)
    }

    pub async fn search_food_detailed(&self, query: &str) -> Result<SearchReport> {
        self.search_food_detailed_limit(query, self.max_results).await
    }

    pub async fn search_food_detailed_limit(&self, query: &str, limit: usize) -> Result<SearchReport> {
        let intent = self.parse(query);
        let dish_ids = self.resolve_top(&intent, limit.min(self.max_results)).await?;
        let dishes = self.repo.get_dishes_by_ids(&dish_ids).await?;

        Ok(SearchReport {
            query: query.to_string(),
            intent,
            total: dish_ids.len(),
            dish_ids,
            dishes,
        })
    }

    /// Explicit filters, cheapest first / 按显式条件搜索
    pub async fn search_with_filter(&self, filter: &SearchFilter) -> Result<Vec<i64>> {
        let mut ids = self.repo.complex_search(filter).await?;
        ids.truncate(self.max_results);
        Ok(ids)
    }

    /// Run the intent against the repository / 执行意图
    pub async fn resolve(&self, intent: &SearchIntent) -> Result<Vec<i64>> {
        self.resolve_top(intent, self.max_results).await
    }

    async fn resolve_top(&self, intent: &SearchIntent, limit: usize) -> Result<Vec<i64>> {
        if intent.is_empty() {
            tracing::debug!("Empty intent, no results");
            return Ok(Vec::new());
        }

        let mut result: Option<BTreeSet<i64>> = None;

        if !intent.foods.is_empty() {
            let mut set = BTreeSet::new();
            for food in &intent.foods {
                set.extend(self.repo.search_dishes_by_name(&food.name_term).await?);
                if let Some(category) = &food.category_term {
                    set.extend(self.repo.search_dishes_by_category(category).await?);
                }
            }
            result = intersect(result, set);
        }

        if !intent.cuisines.is_empty() {
            let mut set = BTreeSet::new();
            for term in intent.cuisines.iter().flat_map(|c| c.restaurant_terms.iter()) {
                set.extend(self.repo.search_dishes_by_restaurant(term).await?);
            }
            result = intersect(result, set);
        }

        if !intent.restaurants.is_empty() {
            let mut set = BTreeSet::new();
            for name in &intent.restaurants {
                set.extend(self.repo.search_dishes_by_restaurant(name).await?);
            }
            result = intersect(result, set);
        }

        if intent.has_price() {
            let set = self
                .repo
                .search_dishes_by_price_range(intent.min_price, intent.max_price)
                .await?
                .into_iter()
                .collect();
            result = intersect(result, set);
        }

        if !intent.fallback_terms.is_empty() {
            let mut set = BTreeSet::new();
            for term in &intent.fallback_terms {
                set.extend(self.repo.search_dishes_by_name(term).await?);
            }
            result = intersect(result, set);
        }

        Ok(result
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .collect())
    }
}

fn intersect(acc: Option<BTreeSet<i64>>, next: BTreeSet<i64>) -> Option<BTreeSet<i64>> {
    Some(match acc {
        Some(acc) => acc.intersection(&next).copied().collect(),
        None => next,
    })
}

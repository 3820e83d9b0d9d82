//! 菜品数据访问层 / Dish data access layer
//!
//! Every search method runs one parameterized statement and returns dish IDs.
//! Only available dishes (isAvailable = 1) are returned by searches.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::{Result, SearchError};
use crate::models::{non_blank, CategoryInfo, DatabaseStats, Dish, Ingredient, Restaurant, SearchFilter};

/// Dish with category and restaurant columns, joined up the
/// restaurant → menu → category → dish tree
const DISH_SELECT: &str = r#"
    SELECT
        d.id, d.name, COALESCE(d.description, '') AS description, d.price,
        mc.name AS category, mc.id AS category_id,
        r.name AS restaurant, r.id AS restaurant_id
    FROM dishes d
    JOIN menu_categories mc ON d.categoryId = mc.id
    JOIN menus m ON mc.menuId = m.id
    JOIN restaurants r ON m.restaurantId = r.id
"#;

const DISH_ID_JOINED: &str = r#"
    SELECT d.id
    FROM dishes d
    JOIN menu_categories mc ON d.categoryId = mc.id
    JOIN menus m ON mc.menuId = m.id
    JOIN restaurants r ON m.restaurantId = r.id
    WHERE d.isAvailable = 1
"#;

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}

/// Reject negative, NaN or inverted bounds / 校验价格区间
pub fn validate_price_range(min_price: Option<f64>, max_price: Option<f64>) -> Result<()> {
    let invalid = |v: Option<f64>| v.map(|p| p.is_nan() || p < 0.0).unwrap_or(false);
    let inverted = matches!((min_price, max_price), (Some(min), Some(max)) if min > max);

    if invalid(min_price) || invalid(max_price) || inverted {
        return Err(SearchError::InvalidPriceRange { min: min_price, max: max_price });
    }
    Ok(())
}

/// Restaurant database access / 餐厅数据库访问
#[derive(Clone)]
pub struct DishRepository {
    pool: SqlitePool,
}

impl DishRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 关闭数据库连接池 / Close database connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// All available dishes, by name / 获取全部可用菜品
    pub async fn get_all_dishes(&self) -> Result<Vec<Dish>> {
        let sql = format!("{} WHERE d.isAvailable = 1 ORDER BY d.name, d.id", DISH_SELECT);
        let dishes = sqlx::query_as::<_, Dish>(&sql).fetch_all(&self.pool).await?;
        Ok(dishes)
    }

    /// IDs of every available dish, ascending / 列出全部菜品ID
    pub async fn list_dish_ids(&self) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM dishes WHERE isAvailable = 1 ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    /// Name or description contains `query` / 按名称或描述搜索
    pub async fn search_dishes_by_name(&self, query: &str) -> Result<Vec<i64>> {
        let pattern = like_pattern(query);
        tracing::debug!("search_dishes_by_name: {}", pattern);

        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT d.id
            FROM dishes d
            WHERE d.isAvailable = 1
            AND (d.name LIKE ? OR d.description LIKE ?)
            ORDER BY d.id
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Menu category name contains `category` / 按分类搜索
    pub async fn search_dishes_by_category(&self, category: &str) -> Result<Vec<i64>> {
        let pattern = like_pattern(category);
        tracing::debug!("search_dishes_by_category: {}", pattern);

        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT d.id
            FROM dishes d
            JOIN menu_categories mc ON d.categoryId = mc.id
            WHERE d.isAvailable = 1
            AND mc.name LIKE ?
            ORDER BY d.id
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Inclusive price bounds, each optional; cheapest first / 按价格区间搜索
    pub async fn search_dishes_by_price_range(
        &self,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Vec<i64>> {
        validate_price_range(min_price, max_price)?;
        tracing::debug!("search_dishes_by_price_range: min={:?} max={:?}", min_price, max_price);

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT d.id FROM dishes d WHERE d.isAvailable = 1");
        if let Some(min) = min_price {
            qb.push(" AND d.price >= ").push_bind(min);
        }
        if let Some(max) = max_price {
            qb.push(" AND d.price <= ").push_bind(max);
        }
        qb.push(" ORDER BY d.price, d.id");

        let ids = qb.build_query_scalar::<i64>().fetch_all(&self.pool).await?;
        Ok(ids)
    }

    /// Restaurant name or description contains `restaurant_query`, across
    /// all of its menus / 按餐厅搜索
    pub async fn search_dishes_by_restaurant(&self, restaurant_query: &str) -> Result<Vec<i64>> {
        let pattern = like_pattern(restaurant_query);
        tracing::debug!("search_dishes_by_restaurant: {}", pattern);

        let sql = format!(
            "{} AND (r.name LIKE ? OR r.description LIKE ?) ORDER BY d.id",
            DISH_ID_JOINED
        );
        let ids = sqlx::query_scalar::<_, i64>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Details for the given IDs, cheapest first / 批量获取菜品详情
    ///
    /// Availability is not checked here: asking for an ID returns it.
    pub async fn get_dishes_by_ids(&self, dish_ids: &[i64]) -> Result<Vec<Dish>> {
        if dish_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(DISH_SELECT);
        qb.push(" WHERE d.id IN (");
        let mut separated = qb.separated(", ");
        for id in dish_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY d.price, d.id");

        let dishes = qb.build_query_as::<Dish>().fetch_all(&self.pool).await?;
        Ok(dishes)
    }

    /// Single dish detail / 获取单个菜品
    pub async fn get_dish(&self, dish_id: i64) -> Result<Dish> {
        let sql = format!("{} WHERE d.id = ?", DISH_SELECT);
        sqlx::query_as::<_, Dish>(&sql)
            .bind(dish_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(SearchError::NotFound(dish_id))
    }

    pub async fn get_ingredients(&self, dish_id: i64) -> Result<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            "SELECT id, dishId AS dish_id, name, quantity FROM ingredient WHERE dishId = ? ORDER BY id",
        )
        .bind(dish_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ingredients)
    }

    /// Active restaurants, by name / 获取全部营业中的餐厅
    pub async fn get_all_restaurants(&self) -> Result<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, COALESCE(description, '') AS description,
                   phone, COALESCE(email, '') AS email
            FROM restaurants
            WHERE isActive = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(restaurants)
    }

    /// Active menu categories with their restaurant / 获取全部分类
    pub async fn get_categories(&self) -> Result<Vec<CategoryInfo>> {
        let categories = sqlx::query_as::<_, CategoryInfo>(
            r#"
            SELECT mc.id, mc.name, r.name AS restaurant
            FROM menu_categories mc
            JOIN menus m ON mc.menuId = m.id
            JOIN restaurants r ON m.restaurantId = r.id
            WHERE mc.isActive = 1
            ORDER BY r.name, mc.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Conjunction of every filter present; cheapest first / 组合条件搜索
    pub async fn complex_search(&self, filter: &SearchFilter) -> Result<Vec<i64>> {
        validate_price_range(filter.min_price, filter.max_price)?;
        if filter.is_empty() {
            tracing::debug!("complex_search without predicates, matching every available dish");
        } else {
            tracing::debug!("complex_search: {:?}", filter);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(DISH_ID_JOINED);

        if let Some(name) = non_blank(&filter.name) {
            let pattern = like_pattern(name);
            qb.push(" AND (d.name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR d.description LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(category) = non_blank(&filter.category) {
            qb.push(" AND mc.name LIKE ").push_bind(like_pattern(category));
        }
        if let Some(restaurant) = non_blank(&filter.restaurant) {
            let pattern = like_pattern(restaurant);
            qb.push(" AND (r.name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.description LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND d.price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND d.price <= ").push_bind(max);
        }
        qb.push(" ORDER BY d.price, d.id");

        let ids = qb.build_query_scalar::<i64>().fetch_all(&self.pool).await?;
        Ok(ids)
    }

    /// Row counts / 获取统计信息
    pub async fn get_database_stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            restaurants: self.count("restaurants").await?,
            dishes: self.count("dishes").await?,
            menu_categories: self.count("menu_categories").await?,
            users: self.count("users").await?,
        })
    }

    // Table names are fixed literals from get_database_stats, never user input
    async fn count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

//! SQLite pool and schema bootstrap / 数据库连接与表结构
//!
//! Tables mirror the restaurant database: users, addresses, restaurants,
//! menus, menu_categories, dishes, ingredient, orders, order_items.
//! Column names keep the camelCase of the original database file.
//! Enum / array / JSON columns are stored as plain TEXT.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;

/// Open a pool on a file database (WAL mode) / 打开文件数据库连接池
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    tracing::info!("Database opened: {} (WAL mode)", database_url);
    Ok(pool)
}

/// Open a private in-memory database / 打开内存数据库
///
/// Single connection that never expires, otherwise every new connection
/// would see an empty database.
pub async fn connect_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create tables that do not exist yet / 创建不存在的表
/// Existing data is never touched.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            phone INTEGER,
            firstName TEXT NOT NULL,
            lastName TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'CLIENT',
            password TEXT NOT NULL,
            isActive BOOLEAN NOT NULL DEFAULT 1,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            phone TEXT NOT NULL DEFAULT '',
            email TEXT,
            operatingHours TEXT,
            isActive BOOLEAN NOT NULL DEFAULT 1,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS addresses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            userId INTEGER,
            restaurantId INTEGER,
            street TEXT NOT NULL,
            city TEXT NOT NULL,
            postalCode TEXT,
            createdAt TEXT NOT NULL,
            FOREIGN KEY (userId) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (restaurantId) REFERENCES restaurants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            restaurantId INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            isActive BOOLEAN NOT NULL DEFAULT 1,
            displayOrder INTEGER NOT NULL DEFAULT 0,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL,
            FOREIGN KEY (restaurantId) REFERENCES restaurants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS menu_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            menuId INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            isActive BOOLEAN NOT NULL DEFAULT 1,
            displayOrder INTEGER NOT NULL DEFAULT 0,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL,
            FOREIGN KEY (menuId) REFERENCES menus(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dishes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            categoryId INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            isAvailable BOOLEAN NOT NULL DEFAULT 1,
            quantity INTEGER NOT NULL DEFAULT 0,
            preparationTime INTEGER,
            popularity REAL NOT NULL DEFAULT 0,
            displayOrder INTEGER NOT NULL DEFAULT 0,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL,
            FOREIGN KEY (categoryId) REFERENCES menu_categories(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dishId INTEGER NOT NULL,
            name TEXT,
            quantity REAL NOT NULL,
            FOREIGN KEY (dishId) REFERENCES dishes(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            userId INTEGER NOT NULL,
            restaurantId INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING',
            totalAmount REAL NOT NULL DEFAULT 0,
            createdAt TEXT NOT NULL,
            updatedAt TEXT NOT NULL,
            FOREIGN KEY (userId) REFERENCES users(id),
            FOREIGN KEY (restaurantId) REFERENCES restaurants(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            orderId INTEGER NOT NULL,
            dishId INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            unitPrice REAL NOT NULL,
            FOREIGN KEY (orderId) REFERENCES orders(id) ON DELETE CASCADE,
            FOREIGN KEY (dishId) REFERENCES dishes(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // LIKE 搜索和连接用的索引
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dishes_category ON dishes(categoryId)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dishes_price ON dishes(price)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_categories_menu ON menu_categories(menuId)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_menus_restaurant ON menus(restaurantId)")
        .execute(pool)
        .await?;

    tracing::debug!("Schema ready");
    Ok(())
}

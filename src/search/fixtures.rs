//! Deterministic test data / 测试数据
//!
//! Dish IDs follow insertion order:
//! 1-5 pizzas, 6 dessert (Pizza Palace), 7-8 burgers, 9-10 nigiri,
//! 11-13 pasta, 14-15 curries, 16 an unavailable pizza.

use sqlx::SqlitePool;

use crate::db;

const RESTAURANTS: &[(&str, &str, Option<&str>, bool)] = &[
    ("Pizza Palace", "Authentic Italian pizzeria with wood-fired ovens and fresh ingredients", Some("info@pizzapalace.dz"), true),
    ("Burger Heaven", "Premium burgers made with locally sourced beef and artisan buns", Some("contact@burgerheaven.dz"), true),
    ("Sushi Zen", "Traditional Japanese sushi bar with fresh fish flown in daily", Some("hello@sushizen.dz"), true),
    ("Pasta Corner", "Homemade pasta with traditional Italian recipes and modern twists", Some("info@pastacorner.dz"), true),
    ("Spice Route", "Authentic Indian and Pakistani cuisine with aromatic spices and tandoor specialties", None, true),
    ("Closed Kitchen", "Temporarily closed", None, false),
];

/// (menu id, name)
const CATEGORIES: &[(i64, &str)] = &[
    (1, "Pizzas"),
    (1, "Desserts"),
    (2, "Burgers"),
    (3, "Nigiri"),
    (4, "Pasta"),
    (5, "Curries"),
];

/// (category id, name, description, price, available)
const DISHES: &[(i64, &str, &str, f64, bool)] = &[
    (1, "Margherita Pizza", "Classic pizza with tomato sauce, mozzarella, and fresh basil", 1200.0, true),
    (1, "Pepperoni Pizza", "Spicy pepperoni with mozzarella cheese and tomato sauce", 1400.0, true),
    (1, "Quattro Stagioni", "Four seasons pizza with mushrooms, artichokes, olives, and ham", 1600.0, true),
    (1, "Vegetarian Supreme", "Veggie pizza with bell peppers, mushrooms, onions, and olives", 1350.0, true),
    (1, "Meat Lovers", "Pizza topped with pepperoni, sausage, ham, and ground beef", 1800.0, true),
    (2, "Tiramisu", "Coffee-soaked ladyfingers with mascarpone", 700.0, true),
    (3, "Classic Cheeseburger", "Beef patty with cheddar cheese, lettuce, tomato, and special sauce", 900.0, true),
    (3, "Veggie Burger", "Plant-based patty with fresh vegetables and tahini sauce", 850.0, true),
    (4, "Salmon Nigiri", "Fresh Atlantic salmon over seasoned sushi rice", 350.0, true),
    (4, "Tuna Nigiri", "Premium bluefin tuna over sushi rice", 400.0, true),
    (5, "Spaghetti Carbonara", "Classic carbonara with eggs, pancetta, and parmesan", 1300.0, true),
    (5, "Penne Arrabbiata", "Spicy tomato sauce with garlic and red peppers", 1100.0, true),
    (5, "Lasagna Bolognese", "Layers of pasta with meat sauce and bechamel", 1450.0, true),
    (6, "Chicken Tikka Masala", "Tender chicken in creamy tomato curry sauce", 1400.0, true),
    (6, "Vegetable Korma", "Mixed vegetables in coconut curry sauce", 1200.0, true),
    (1, "Seasonal Special", "Chef's pizza of the day", 500.0, false),
];

/// In-memory database with schema and fixture rows
pub async fn seeded_pool() -> SqlitePool {
    let pool = db::connect_memory().await.unwrap();
    db::init_schema(&pool).await.unwrap();
    seed(&pool).await;
    pool
}

async fn seed(pool: &SqlitePool) {
    let now = chrono::Utc::now().to_rfc3339();

    for (name, description, email, active) in RESTAURANTS {
        let id = sqlx::query(
            "INSERT INTO restaurants (name, description, phone, email, isActive, createdAt, updatedAt)
             VALUES (?, ?, '023-000-000', ?, ?, ?, ?)",
        )
        .bind(*name)
        .bind(*description)
        .bind(*email)
        .bind(*active)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO menus (restaurantId, name, isActive, createdAt, updatedAt) VALUES (?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(format!("{} Menu", name))
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (order, (menu_id, name)) in CATEGORIES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO menu_categories (menuId, name, isActive, displayOrder, createdAt, updatedAt)
             VALUES (?, ?, 1, ?, ?, ?)",
        )
        .bind(*menu_id)
        .bind(*name)
        .bind(order as i64)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (category_id, name, description, price, available) in DISHES {
        sqlx::query(
            "INSERT INTO dishes (categoryId, name, description, price, isAvailable, createdAt, updatedAt)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(*category_id)
        .bind(*name)
        .bind(*description)
        .bind(*price)
        .bind(*available)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (name, quantity) in [("mozzarella cheese", 0.5), ("tomato sauce", 0.3), ("basil", 0.1)] {
        sqlx::query("INSERT INTO ingredient (dishId, name, quantity) VALUES (1, ?, ?)")
            .bind(name)
            .bind(quantity)
            .execute(pool)
            .await
            .unwrap();
    }

    for (email, first, last) in [("john.doe@email.com", "John", "Doe"), ("jane.smith@email.com", "Jane", "Smith")] {
        sqlx::query(
            "INSERT INTO users (email, firstName, lastName, password, createdAt, updatedAt)
             VALUES (?, ?, ?, 'hashed_password', ?, ?)",
        )
        .bind(email)
        .bind(first)
        .bind(last)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
    }
}

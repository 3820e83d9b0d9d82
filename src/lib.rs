pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;

pub use error::{Result, SearchError};
pub use search::{DishRepository, FoodSearch, IntentParser, SearchIntent, SearchReport};

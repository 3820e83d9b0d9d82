//! Search module - dish lookup driven by free-text queries / 菜品搜索模块
//!
//! Layers / 分层：
//! - repository: SQL primitives over the restaurant database, each returning dish IDs
//! - intent: keyword / regex parsing of a query into filters
//! - service: resolves an intent (union inside a dimension, intersection across)
//!
//! Call direction: service → intent, service → repository (unidirectional) / 调用方向

pub mod intent;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use intent::{CuisineTerm, FoodTerm, IntentParser, SearchIntent};
pub use repository::DishRepository;
pub use service::{FoodSearch, SearchReport};

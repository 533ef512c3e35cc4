//! # Recipe API
//!
//! A read-only HTTP API over a recipe dataset built on Axum and Sea-ORM.
//!
//! - `GET /api/recipes?page=&limit=`: recipes ordered by rating, unrated last
//! - `GET /api/recipes/search?title=&cuisine=&calories=&total_time=&rating=`:
//!   substring and numeric-range search (see [`filtering`])
//! - `GET /api/recipes/{id}`: a single recipe or `404 {"detail": "Recipe not found"}`
//!
//! The dataset is imported once from a JSON file when the store is empty.

pub mod config;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod openapi;
pub mod recipe;
pub mod routes;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{Config, StoreBackend};
pub use errors::{ApiError, ConfigError, SeedError};
pub use recipe::Recipe;
pub use service::RecipeService;
pub use store::{MemoryRecipeStore, RecipeStore, SqlRecipeStore};

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use recipe_api::{
    MemoryRecipeStore, RecipeService, RecipeStore, SqlRecipeStore,
    routes,
    seed::{NewRecipe, SeedSource, records_from_document},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Sql,
    Memory,
}

pub const BACKENDS: [Backend; 2] = [Backend::Sql, Backend::Memory];

pub async fn setup_sql_store() -> SqlRecipeStore {
    let store = SqlRecipeStore::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite");
    store.ensure_schema().await.expect("Failed to create schema");
    store
}

pub async fn seeded_store(backend: Backend, records: Vec<NewRecipe>) -> Arc<dyn RecipeStore> {
    let store: Arc<dyn RecipeStore> = match backend {
        Backend::Sql => Arc::new(setup_sql_store().await),
        Backend::Memory => Arc::new(MemoryRecipeStore::new()),
    };
    store
        .seed_if_empty(SeedSource::Records(records))
        .await
        .expect("Failed to seed store");
    store
}

pub async fn setup_app(backend: Backend, records: Vec<NewRecipe>) -> Router {
    let store = seeded_store(backend, records).await;
    routes::app(RecipeService::new(store), Duration::from_secs(10))
}

/// Normalize recipe objects the same way the seed file importer does
pub fn records(items: Vec<Value>) -> Vec<NewRecipe> {
    let document: serde_json::Map<String, Value> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (format!("{i}"), item))
        .collect();
    records_from_document(&Value::Object(document)).expect("fixture should be valid")
}

/// Five recipes with mixed ratings, times and nutrient strings.
/// Source order (and therefore ids 1..=5) is the vector order.
pub fn sample_recipes() -> Vec<NewRecipe> {
    records(vec![
        json!({
            "cuisine": "Southern Recipes",
            "title": "Sweet Potato Pie",
            "rating": 4.5,
            "prep_time": 15,
            "cook_time": 100,
            "total_time": 115,
            "description": "A classic holiday pie",
            "nutrients": {"calories": "389 kcal", "fatContent": "21 g"},
            "serves": "8 servings"
        }),
        json!({
            "cuisine": "Italian",
            "title": "Quick Tomato Pasta",
            "rating": null,
            "prep_time": 5,
            "cook_time": 15,
            "total_time": 20,
            "description": "Weeknight pasta",
            "nutrients": {"calories": "1,024 cal"},
            "serves": "2 servings"
        }),
        json!({
            "cuisine": "italian",
            "title": "Tiramisu",
            "rating": 3.0,
            "prep_time": 30,
            "cook_time": 0,
            "total_time": 30,
            "description": null,
            "nutrients": {"calories": "unknown"},
            "serves": "6"
        }),
        json!({
            "cuisine": "Mexican",
            "title": "Black Bean Soup",
            "rating": "NaN",
            "prep_time": "NaN",
            "cook_time": 40,
            "total_time": 50,
            "description": "Smoky soup",
            "nutrients": null,
            "serves": null
        }),
        json!({
            "cuisine": "Southern Recipes",
            "title": "Peach Cobbler",
            "rating": 5.0,
            "prep_time": 20,
            "cook_time": 45,
            "total_time": 65,
            "description": "Summer dessert",
            "nutrients": {"calories": "250 kcal"},
            "serves": "10 servings"
        }),
    ])
}

/// Accented, mixed-case titles and cuisines
pub fn accented_recipes() -> Vec<NewRecipe> {
    records(vec![
        json!({"title": "Crème Brûlée", "cuisine": "Française", "rating": 4.0}),
        json!({"title": "Crêpes Suzette", "cuisine": "française", "rating": 4.5}),
        json!({"title": "Creme Caramel", "cuisine": "Francaise", "rating": 3.0}),
        json!({"title": "Straße Brezel", "cuisine": "Deutsch", "rating": null}),
    ])
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Failed to parse JSON from {uri} ({status}): {e}: {}",
            String::from_utf8_lossy(&body)
        )
    });
    (status, value)
}

pub fn search_uri(pairs: &[(&str, &str)]) -> String {
    let query: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", url_escape::encode_component(value)))
        .collect();
    format!("/api/recipes/search?{}", query.join("&"))
}

pub fn ids(page: &Value) -> Vec<i64> {
    page["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|recipe| recipe["id"].as_i64().expect("id should be an integer"))
        .collect()
}

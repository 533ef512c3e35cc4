use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::errors::ApiError;
use crate::models::{ListParams, RecipePage, SearchParams, StatusMessage};
use crate::openapi::ApiDoc;
use crate::recipe::Recipe;
use crate::service::RecipeService;

pub const ROOT_MESSAGE: &str = "Recipes API is running. Visit /docs for API documentation.";

// Malformed query or path values are reported as 422, like out-of-range ones
fn unprocessable(rejection: &impl std::fmt::Display) -> ApiError {
    ApiError::validation_failed(vec![rejection.to_string()])
}

#[utoipa::path(
    get,
    path = "/",
    tag = "recipes",
    responses(
        (status = 200, description = "Service is up", body = StatusMessage)
    )
)]
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: ROOT_MESSAGE.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListParams),
    responses(
        (status = 200, description = "One page of recipes ordered by rating, unrated last", body = RecipePage),
        (status = 422, description = "page or limit out of range")
    )
)]
pub async fn list_recipes(
    State(service): State<RecipeService>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<RecipePage>, ApiError> {
    let Query(params) = params.map_err(|rejection| unprocessable(&rejection))?;
    service.list_recipes(&params).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching recipes ordered by rating, unrated last", body = RecipePage),
        (status = 422, description = "page or limit out of range")
    )
)]
pub async fn search_recipes(
    State(service): State<RecipeService>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<RecipePage>, ApiError> {
    let Query(params) = params.map_err(|rejection| unprocessable(&rejection))?;
    service.search_recipes(&params).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "The requested recipe", body = Recipe),
        (status = 404, description = "Recipe not found"),
        (status = 422, description = "id is not an integer")
    )
)]
pub async fn get_recipe(
    State(service): State<RecipeService>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id.map_err(|rejection| unprocessable(&rejection))?;
    service.get_recipe(id).await.map(Json)
}

/// Routes plus the Scalar documentation UI at `/docs`
pub fn router(service: RecipeService) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(root))
        .routes(routes!(list_recipes))
        .routes(routes!(search_recipes))
        .routes(routes!(get_recipe))
        .with_state(service)
        .split_for_parts();

    router.merge(Scalar::with_url("/docs", api))
}

/// Permissive CORS, request tracing and a per-request deadline answered
/// with `408 Request Timeout`
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Full application: [`router`] wrapped in [`with_middleware`]
pub fn app(service: RecipeService, request_timeout: Duration) -> Router {
    with_middleware(router(service), request_timeout)
}

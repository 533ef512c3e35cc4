use std::sync::Arc;

use crate::errors::ApiError;
use crate::filtering::{PageRequest, RecipeFilter};
use crate::models::{ListParams, RecipePage, SearchParams};
use crate::recipe::Recipe;
use crate::store::RecipeStore;

pub const RESOURCE_NAME: &str = "Recipe";

/// Validates requests, composes filters and shapes store results into
/// response envelopes. Cheap to clone; shared as axum state.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// All recipes, one page at a time
    ///
    /// # Errors
    ///
    /// `ValidationFailed` for out-of-range `page`/`limit`, `Database` if the store fails.
    pub async fn list_recipes(&self, params: &ListParams) -> Result<RecipePage, ApiError> {
        let page = PageRequest::new(params.page, params.limit)?;
        self.fetch_page(&RecipeFilter::all(), page).await
    }

    /// Recipes matching every supplied search argument
    ///
    /// # Errors
    ///
    /// `ValidationFailed` for out-of-range `page`/`limit`, `Database` if the store fails.
    /// Malformed numeric filters are not errors; they are skipped.
    pub async fn search_recipes(&self, params: &SearchParams) -> Result<RecipePage, ApiError> {
        let page = PageRequest::new(params.page, params.limit)?;
        let filter = RecipeFilter::from_search(params);
        tracing::debug!(predicates = filter.predicates().len(), "Searching recipes");
        self.fetch_page(&filter, page).await
    }

    /// # Errors
    ///
    /// `NotFound` if no recipe has this id, `Database` if the store fails.
    pub async fn get_recipe(&self, id: i32) -> Result<Recipe, ApiError> {
        self.store
            .get_by_id(id)
            .await
            .map_err(ApiError::database)?
            .map(Recipe::from)
            .ok_or_else(|| ApiError::not_found(RESOURCE_NAME, Some(id.to_string())))
    }

    async fn fetch_page(&self, filter: &RecipeFilter, page: PageRequest) -> Result<RecipePage, ApiError> {
        let slice = self
            .store
            .query(filter, page)
            .await
            .map_err(ApiError::database)?;

        Ok(RecipePage {
            page: page.page(),
            limit: page.limit(),
            total: slice.total,
            data: slice.records.into_iter().map(Recipe::from).collect(),
        })
    }
}

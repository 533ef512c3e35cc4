use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::recipe::Recipe;

/// Query parameters for `GET /api/recipes`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number (1-based). Defaults to 1.
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
    /// Page size between 1 and 100. Defaults to 10.
    #[param(example = 10, minimum = 1, maximum = 100)]
    pub limit: Option<u64>,
}

/// Query parameters for `GET /api/recipes/search`.
///
/// # Numeric filters
/// `calories`, `total_time` and `rating` accept an optional comparison
/// operator followed by a number:
/// - `<=400`, `>=4.5`, `<30`, `>3`, `=100`
/// - a bare number such as `30` means `=30`
///
/// A value that does not follow this form is ignored.
///
/// # Text filters
/// `title` and `cuisine` match case-insensitive substrings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring of the recipe title
    #[param(example = "pie")]
    pub title: Option<String>,
    /// Substring of the cuisine
    #[param(example = "Southern")]
    pub cuisine: Option<String>,
    /// Calorie filter, e.g. `<=400`
    #[param(example = "<=400")]
    pub calories: Option<String>,
    /// Total time filter, e.g. `<=30`
    #[param(example = "<=30")]
    pub total_time: Option<String>,
    /// Rating filter, e.g. `>=4.5`
    #[param(example = ">=4.5")]
    pub rating: Option<String>,
    /// Page number (1-based). Defaults to 1.
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
    /// Page size between 1 and 100. Defaults to 10.
    #[param(example = 10, minimum = 1, maximum = 100)]
    pub limit: Option<u64>,
}

/// One page of recipes in rating order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipePage {
    pub page: u64,
    pub limit: u64,
    /// Number of recipes matching the request before pagination
    pub total: u64,
    pub data: Vec<Recipe>,
}

/// Liveness response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    pub message: String,
}

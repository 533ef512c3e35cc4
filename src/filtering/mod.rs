//! # Recipe Filtering
//!
//! Translates search query parameters into constraints the stores can apply.
//!
//! ## Numeric filter strings
//!
//! `calories`, `total_time` and `rating` take a compact comparison:
//!
//! ```text
//! GET /api/recipes/search?calories=<=400
//! GET /api/recipes/search?rating=>=4.5
//! GET /api/recipes/search?total_time=30      // bare number means "="
//! ```
//!
//! A string that does not match `(<=|>=|<|>|=)?-?\d+(\.\d+)?` is ignored rather
//! than rejected, so a garbage filter widens the search instead of failing it.
//!
//! ## Text filters
//!
//! `title` and `cuisine` are case-insensitive substring matches.
//!
//! ## Ordering and pagination
//!
//! Results are always ordered by rating descending with unrated recipes last,
//! tie-broken by id. Pages are 1-based with `limit` between 1 and 100.

pub mod calories;
pub mod conditions;
pub mod pagination;
pub mod parser;
pub mod sort;

pub use calories::{extract_calories, parse_calorie_string};
pub use conditions::{Predicate, RecipeFilter, build_like_condition, build_numeric_condition, fold_case};
pub use pagination::PageRequest;
pub use parser::{CompareOp, NumericFilter, parse_numeric_filter};
pub use sort::{compare_recipes, order_by_rating};

use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{LikeExpr, SimpleExpr},
};

use super::parser::{CompareOp, NumericFilter, parse_numeric_filter};
use crate::models::SearchParams;
use crate::recipe::{Column, Model};

/// Escape LIKE wildcards so user input matches literally.
/// Escapes: `\` (the escape char itself), `%` (match any) and `_` (match single char)
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case folding shared by the stored `*_upper` columns and search input.
/// Not delegated to SQL `UPPER()`, which folds only ASCII on `SQLite`.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_uppercase()
}

/// Build `column LIKE '%VALUE%' ESCAPE '\'` against a case-folded column
#[must_use]
pub fn build_like_condition(column: impl ColumnTrait, value: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_wildcards(&fold_case(value)));
    column.like(LikeExpr::new(pattern).escape('\\'))
}

/// Compare a numeric column against a parsed filter.
/// NULL never satisfies a SQL comparison, so absent values drop out.
#[must_use]
pub fn build_numeric_condition(column: impl ColumnTrait, filter: NumericFilter) -> SimpleExpr {
    let value = filter.value;
    match filter.op {
        CompareOp::Lte => column.lte(value),
        CompareOp::Gte => column.gte(value),
        CompareOp::Lt => column.lt(value),
        CompareOp::Gt => column.gt(value),
        CompareOp::Eq => column.eq(value),
    }
}

fn contains_folded(folded: Option<&str>, needle: &str) -> bool {
    folded.is_some_and(|text| text.contains(&fold_case(needle)))
}

fn numeric_matches<T: Into<f64>>(field: Option<T>, filter: NumericFilter) -> bool {
    field.is_some_and(|value| filter.matches(value.into()))
}

/// A single constraint over one recipe
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    TitleContains(String),
    CuisineContains(String),
    TotalTime(NumericFilter),
    Rating(NumericFilter),
    /// Compares against the calorie value derived from `nutrients` at seed time
    Calories(NumericFilter),
}

impl Predicate {
    #[must_use]
    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            Self::TitleContains(text) => build_like_condition(Column::TitleUpper, text),
            Self::CuisineContains(text) => build_like_condition(Column::CuisineUpper, text),
            Self::TotalTime(filter) => build_numeric_condition(Column::TotalTime, *filter),
            Self::Rating(filter) => build_numeric_condition(Column::Rating, *filter),
            Self::Calories(filter) => build_numeric_condition(Column::Calories, *filter),
        }
    }

    #[must_use]
    pub fn matches(&self, recipe: &Model) -> bool {
        match self {
            Self::TitleContains(text) => contains_folded(recipe.title_upper.as_deref(), text),
            Self::CuisineContains(text) => contains_folded(recipe.cuisine_upper.as_deref(), text),
            Self::TotalTime(filter) => numeric_matches(recipe.total_time, *filter),
            Self::Rating(filter) => numeric_matches(recipe.rating, *filter),
            Self::Calories(filter) => numeric_matches(recipe.calories, *filter),
        }
    }
}

/// Conjunction of predicates. An empty filter matches every recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    predicates: Vec<Predicate>,
}

impl RecipeFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Compose the search parameters into a filter.
    ///
    /// Empty text arguments and numeric filters that fail to parse impose no
    /// constraint.
    #[must_use]
    pub fn from_search(params: &SearchParams) -> Self {
        let text = |value: &Option<String>| value.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);
        let numeric = |value: &Option<String>| value.as_deref().and_then(parse_numeric_filter);

        let mut filter = Self::all();
        if let Some(title) = text(&params.title) {
            filter = filter.and(Predicate::TitleContains(title));
        }
        if let Some(cuisine) = text(&params.cuisine) {
            filter = filter.and(Predicate::CuisineContains(cuisine));
        }
        if let Some(total_time) = numeric(&params.total_time) {
            filter = filter.and(Predicate::TotalTime(total_time));
        }
        if let Some(rating) = numeric(&params.rating) {
            filter = filter.and(Predicate::Rating(rating));
        }
        if let Some(calories) = numeric(&params.calories) {
            filter = filter.and(Predicate::Calories(calories));
        }
        filter
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn to_condition(&self) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |condition, predicate| condition.add(predicate.to_expr()))
    }

    #[must_use]
    pub fn matches(&self, recipe: &Model) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(recipe))
    }
}

//! One-time import of the recipe dataset.
//!
//! The source is a JSON object whose values are recipe-shaped objects; keys
//! are ignored and records are imported in file order. Numeric fields are
//! normalized so that NaN, infinities and non-numeric values become absent,
//! and the calorie value is derived once from `nutrients` here so queries
//! never have to re-parse it.

use sea_orm::ActiveValue::{NotSet, Set};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::errors::SeedError;
use crate::filtering::calories::extract_calories;
use crate::filtering::conditions::fold_case;
use crate::recipe::{ActiveModel, Model};

// Python and pandas exports emit these bare tokens; serde_json rejects them
const NON_FINITE_LITERALS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// A normalized recipe that has not been assigned an id yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecipe {
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    pub nutrients: Option<Value>,
    pub serves: Option<String>,
    pub calories: Option<f64>,
}

impl NewRecipe {
    /// Normalize one recipe object from the seed source
    #[must_use]
    pub fn from_json(item: &Map<String, Value>) -> Self {
        let nutrients = item.get("nutrients").filter(|value| value.is_object()).cloned();
        let calories = extract_calories(nutrients.as_ref());
        Self {
            cuisine: normalize_text(item.get("cuisine")),
            title: normalize_text(item.get("title")),
            rating: normalize_float(item.get("rating")),
            prep_time: normalize_int(item.get("prep_time")),
            cook_time: normalize_int(item.get("cook_time")),
            total_time: normalize_int(item.get("total_time")),
            description: normalize_text(item.get("description")),
            nutrients,
            serves: normalize_text(item.get("serves")),
            calories,
        }
    }

    #[must_use]
    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            rating: self.rating,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            description: self.description,
            nutrients: self.nutrients,
            serves: self.serves,
            calories: self.calories,
            title_upper: self.title.as_deref().map(fold_case),
            cuisine_upper: self.cuisine.as_deref().map(fold_case),
            title: self.title,
            cuisine: self.cuisine,
        }
    }

    #[must_use]
    pub fn into_active_model(self) -> ActiveModel {
        let title_upper = self.title.as_deref().map(fold_case);
        let cuisine_upper = self.cuisine.as_deref().map(fold_case);
        ActiveModel {
            id: NotSet,
            cuisine: Set(self.cuisine),
            title: Set(self.title),
            rating: Set(self.rating),
            prep_time: Set(self.prep_time),
            cook_time: Set(self.cook_time),
            total_time: Set(self.total_time),
            description: Set(self.description),
            nutrients: Set(self.nutrients),
            serves: Set(self.serves),
            calories: Set(self.calories),
            title_upper: Set(title_upper),
            cuisine_upper: Set(cuisine_upper),
        }
    }
}

/// Finite float from a JSON number, numeric string or boolean
fn normalize_float(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    number.is_finite().then_some(number)
}

/// Float normalization truncated toward zero; out of `i32` range is absent
#[allow(clippy::cast_possible_truncation)]
fn normalize_int(value: Option<&Value>) -> Option<i32> {
    let number = normalize_float(value)?.trunc();
    (number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX)).then(|| number as i32)
}

fn normalize_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Replace bare `NaN`, `Infinity` and `-Infinity` tokens outside string
/// literals with `null`. Borrows the input when there is nothing to replace.
#[must_use]
pub fn replace_non_finite_literals(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut output: Option<String> = None;
    let mut copied_to = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if byte == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        if let Some(literal) = NON_FINITE_LITERALS
            .iter()
            .find(|literal| bytes[i..].starts_with(literal.as_bytes()))
        {
            let buffer = output.get_or_insert_with(|| String::with_capacity(text.len()));
            buffer.push_str(&text[copied_to..i]);
            buffer.push_str("null");
            i += literal.len();
            copied_to = i;
            continue;
        }
        i += 1;
    }

    match output {
        Some(mut buffer) => {
            buffer.push_str(&text[copied_to..]);
            Cow::Owned(buffer)
        }
        None => Cow::Borrowed(text),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turn a parsed seed document into normalized records, in document order
///
/// # Errors
///
/// Returns `SeedError::InvalidShape` when the document is not an object of objects.
pub fn records_from_document(document: &Value) -> Result<Vec<NewRecipe>, SeedError> {
    let Value::Object(entries) = document else {
        return Err(SeedError::InvalidShape {
            found: json_kind(document),
        });
    };
    entries
        .values()
        .map(|item| match item {
            Value::Object(fields) => Ok(NewRecipe::from_json(fields)),
            other => Err(SeedError::InvalidShape {
                found: json_kind(other),
            }),
        })
        .collect()
}

/// Where seed records come from
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// JSON file on disk, read only if the store turns out to be empty
    File(PathBuf),
    /// Records already in memory
    Records(Vec<NewRecipe>),
}

impl SeedSource {
    /// Read and normalize the source
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the file cannot be read or parsed.
    pub async fn load(self) -> Result<Vec<NewRecipe>, SeedError> {
        match self {
            Self::Records(records) => Ok(records),
            Self::File(path) => {
                tracing::info!(path = %path.display(), "Loading recipes from JSON");
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| SeedError::Io {
                        path: path.clone(),
                        source,
                    })?;
                let document: Value = serde_json::from_str(&replace_non_finite_literals(&text))
                    .map_err(|source| SeedError::Parse { path, source })?;
                records_from_document(&document)
            }
        }
    }
}

/// Result of a seeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held records; nothing was loaded
    Skipped { existing: u64 },
    /// The store was empty and `count` records were imported
    Imported { count: u64 },
}

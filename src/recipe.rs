use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored recipe row.
///
/// `calories`, `title_upper` and `cuisine_upper` are derived when the store is
/// seeded and are never part of the JSON projection.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub cuisine: Option<String>,
    #[sea_orm(indexed)]
    pub title: Option<String>,
    #[sea_orm(indexed)]
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    #[sea_orm(indexed)]
    pub total_time: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub nutrients: Option<Json>,
    pub serves: Option<String>,
    #[sea_orm(indexed)]
    pub calories: Option<f64>,
    /// Case-folded `title`, matched by substring search
    pub title_upper: Option<String>,
    pub cuisine_upper: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Public JSON shape of a recipe
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: i32,
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    /// Nutrient name to display string, e.g. `{"calories": "389 kcal"}`
    #[schema(value_type = Option<Object>)]
    pub nutrients: Option<serde_json::Value>,
    pub serves: Option<String>,
}

impl From<Model> for Recipe {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            cuisine: model.cuisine,
            rating: model.rating,
            prep_time: model.prep_time,
            cook_time: model.cook_time,
            total_time: model.total_time,
            description: model.description,
            nutrients: model.nutrients,
            serves: model.serves,
        }
    }
}

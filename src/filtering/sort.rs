use sea_orm::{
    QueryOrder,
    sea_query::{NullOrdering, Order},
};
use std::cmp::Ordering;

use crate::recipe::{Column, Model};

/// Order a query by rating descending with unrated recipes last, then by id.
///
/// The id tie-break keeps pagination reproducible across identical requests.
pub fn order_by_rating<Q: QueryOrder>(query: Q) -> Q {
    query
        .order_by_with_nulls(Column::Rating, Order::Desc, NullOrdering::Last)
        .order_by_asc(Column::Id)
}

/// Descending comparison where `None` sorts after every present value.
#[must_use]
pub fn compare_desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// In-memory counterpart of [`order_by_rating`]
#[must_use]
pub fn compare_recipes(a: &Model, b: &Model) -> Ordering {
    compare_desc_nulls_last(a.rating, b.rating).then_with(|| a.id.cmp(&b.id))
}

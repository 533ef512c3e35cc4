//! # Recipe Store
//!
//! [`RecipeStore`] is the capability the query service depends on. Two
//! backends implement it:
//!
//! - [`SqlRecipeStore`]: `SeaORM` over `SQLite`, `PostgreSQL` or `MySQL`. The
//!   derived calorie value is an indexed column, so calorie filters are range
//!   predicates like any other.
//! - [`MemoryRecipeStore`]: records held behind a `RwLock`, pre-sorted once at
//!   seed time and evaluated with the same predicates.
//!
//! Both order results by rating descending with unrated recipes last and
//! break ties by ascending id, and both guard seeding so that concurrent
//! callers cannot import the dataset twice.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::errors::SeedError;
use crate::filtering::{PageRequest, RecipeFilter};
use crate::recipe::Model;
use crate::seed::{SeedOutcome, SeedSource};

mod memory;
mod sql;

pub use memory::MemoryRecipeStore;
pub use sql::SqlRecipeStore;

/// One page of matching records plus the unpaginated match count
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSlice {
    pub total: u64,
    pub records: Vec<Model>,
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Records matching `filter`, sorted and windowed by `page`
    async fn query(&self, filter: &RecipeFilter, page: PageRequest) -> Result<RecipeSlice, DbErr>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;

    /// Import `source` if and only if the store holds no records.
    ///
    /// The emptiness check and the import run under one guard, so concurrent
    /// callers observe either the empty store or the fully seeded one.
    async fn seed_if_empty(&self, source: SeedSource) -> Result<SeedOutcome, SeedError>;
}

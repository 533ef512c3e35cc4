use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{RecipeSlice, RecipeStore};
use crate::errors::SeedError;
use crate::filtering::{PageRequest, RecipeFilter, compare_recipes};
use crate::recipe::Model;
use crate::seed::{SeedOutcome, SeedSource};

#[derive(Default)]
struct Records {
    /// Kept in rating order so filtered scans are already sorted
    sorted: Vec<Model>,
    /// id -> position in `sorted`
    by_id: HashMap<i32, usize>,
}

/// Store backed by process memory. Ids are assigned from 1 in source order.
#[derive(Default)]
pub struct MemoryRecipeStore {
    records: RwLock<Records>,
}

impl MemoryRecipeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn query(&self, filter: &RecipeFilter, page: PageRequest) -> Result<RecipeSlice, DbErr> {
        let records = self.records.read().await;
        let mut matching = records.sorted.iter().filter(|recipe| filter.matches(recipe));

        let skipped = matching.by_ref().take(to_index(page.offset())).count();
        let page_records: Vec<Model> = matching
            .by_ref()
            .take(to_index(page.limit()))
            .cloned()
            .collect();
        let total = skipped + page_records.len() + matching.count();

        Ok(RecipeSlice {
            total: total as u64,
            records: page_records,
        })
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbErr> {
        let records = self.records.read().await;
        Ok(records
            .by_id
            .get(&id)
            .map(|&position| records.sorted[position].clone()))
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Ok(self.records.read().await.sorted.len() as u64)
    }

    async fn seed_if_empty(&self, source: SeedSource) -> Result<SeedOutcome, SeedError> {
        // The write guard covers both the emptiness check and the import
        let mut records = self.records.write().await;

        let existing = records.sorted.len() as u64;
        if existing > 0 {
            tracing::info!(existing, "Store already has recipes, skipping import");
            return Ok(SeedOutcome::Skipped { existing });
        }

        let loaded = source.load().await?;
        let count = loaded.len() as u64;

        let mut sorted: Vec<Model> = (1..)
            .zip(loaded)
            .map(|(id, recipe)| recipe.into_model(id))
            .collect();
        sorted.sort_by(compare_recipes);
        let by_id = sorted
            .iter()
            .enumerate()
            .map(|(position, recipe)| (recipe.id, position))
            .collect();
        *records = Records { sorted, by_id };

        tracing::info!(count, "Imported recipes");
        Ok(SeedOutcome::Imported { count })
    }
}

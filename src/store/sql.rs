use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Schema, TransactionTrait,
};
use std::time::Duration;
use tokio::sync::Mutex;

use super::{RecipeSlice, RecipeStore};
use crate::errors::SeedError;
use crate::filtering::{PageRequest, RecipeFilter, order_by_rating};
use crate::recipe::{self, Model};
use crate::seed::{NewRecipe, SeedOutcome, SeedSource};

// Keeps each multi-row INSERT well under SQLite's bound-parameter limit
const SEED_CHUNK_SIZE: usize = 500;

pub struct SqlRecipeStore {
    db: DatabaseConnection,
    seed_lock: Mutex<()>,
}

impl SqlRecipeStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            seed_lock: Mutex::new(()),
        }
    }

    /// Connect with statement logging disabled.
    ///
    /// An in-memory `SQLite` database only lives as long as its connection, so
    /// the pool is pinned to one connection for `:memory:` URLs.
    ///
    /// # Errors
    ///
    /// Returns `DbErr` if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .connect_timeout(Duration::from_secs(30))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(false);
        if database_url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        }
        let db = Database::connect(options).await?;
        Ok(Self::new(db))
    }

    /// Create the `recipes` table and its column indexes if they are missing
    ///
    /// # Errors
    ///
    /// Returns `DbErr` if a DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(recipe::Entity);
        table.if_not_exists();
        self.db.execute(backend.build(&table)).await?;

        for mut index in schema.create_index_from_entity(recipe::Entity) {
            index.if_not_exists();
            self.db.execute(backend.build(&index)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for SqlRecipeStore {
    async fn query(&self, filter: &RecipeFilter, page: PageRequest) -> Result<RecipeSlice, DbErr> {
        let condition = filter.to_condition();

        let total = recipe::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let records = order_by_rating(recipe::Entity::find().filter(condition))
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(RecipeSlice { total, records })
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbErr> {
        recipe::Entity::find_by_id(id).one(&self.db).await
    }

    async fn count(&self) -> Result<u64, DbErr> {
        recipe::Entity::find().count(&self.db).await
    }

    async fn seed_if_empty(&self, source: SeedSource) -> Result<SeedOutcome, SeedError> {
        let _guard = self.seed_lock.lock().await;

        let existing = self.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Database already has recipes, skipping import");
            return Ok(SeedOutcome::Skipped { existing });
        }

        let records = source.load().await?;
        let count = records.len() as u64;

        let txn = self.db.begin().await?;
        for chunk in records.chunks(SEED_CHUNK_SIZE) {
            recipe::Entity::insert_many(chunk.iter().cloned().map(NewRecipe::into_active_model))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        tracing::info!(count, "Imported recipes");
        Ok(SeedOutcome::Imported { count })
    }
}

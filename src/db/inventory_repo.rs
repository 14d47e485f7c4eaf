// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{missing_reference, still_referenced},
        error::{AppError, Resource},
    },
    models::inventory::{InventoryDraft, InventoryItem},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM inventories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        draft: &InventoryDraft,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventories (name, category, quantity, unit, status, location_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.status)
        .bind(draft.location_id)
        .fetch_one(executor)
        .await
        .map_err(missing_reference(Resource::Location))?;
        Ok(item)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &InventoryDraft,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventories
            SET name = $2, category = $3, quantity = $4, unit = $5,
                status = $6, location_id = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.status)
        .bind(draft.location_id)
        .fetch_optional(executor)
        .await
        .map_err(missing_reference(Resource::Location))?;
        Ok(item)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(still_referenced(Resource::InventoryItem))?;
        Ok(result.rows_affected())
    }
}

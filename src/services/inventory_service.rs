// src/services/inventory_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::{InventoryRepository, LocationRepository},
    models::inventory::{InventoryDraft, InventoryItem},
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    location_repo: LocationRepository,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, location_repo: LocationRepository) -> Self {
        Self { inventory_repo, location_repo }
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.list().await
    }

    pub async fn get_item(&self, id: Uuid) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::InventoryItem))
    }

    // --- CREATE ITEM ---
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        draft: InventoryDraft,
    ) -> Result<InventoryItem, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // O local é conferido antes da escrita; a FK cobre a corrida com um DELETE
        self.ensure_location(&mut tx, draft.location_id).await?;
        let item = self.inventory_repo.create(&mut *tx, &draft).await?;

        tx.commit().await?;
        Ok(item)
    }

    // --- UPDATE ITEM ---
    // A quantidade em estoque só muda por aqui
    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: InventoryDraft,
    ) -> Result<InventoryItem, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.ensure_location(&mut tx, draft.location_id).await?;
        let item = self.inventory_repo
            .update(&mut *tx, id, &draft)
            .await?
            .ok_or(AppError::NotFound(Resource::InventoryItem))?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match self.inventory_repo.delete(executor, id).await? {
            0 => Err(AppError::NotFound(Resource::InventoryItem)),
            affected => Ok(affected),
        }
    }

    async fn ensure_location(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        location_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(loc_id) = location_id {
            if !self.location_repo.exists(&mut **tx, loc_id).await? {
                return Err(AppError::MissingReference(Resource::Location));
            }
        }
        Ok(())
    }
}

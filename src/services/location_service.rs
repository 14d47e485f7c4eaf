// src/services/location_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::LocationRepository,
    models::location::Location,
};

#[derive(Clone)]
pub struct LocationService {
    location_repo: LocationRepository,
}

impl LocationService {
    pub fn new(location_repo: LocationRepository) -> Self {
        Self { location_repo }
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        self.location_repo.list().await
    }

    pub async fn get_location(&self, id: Uuid) -> Result<Location, AppError> {
        self.location_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Location))
    }

    pub async fn create_location<'e, E>(
        &self,
        executor: E,
        name: &str,
        address: &str,
    ) -> Result<Location, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.location_repo.create(executor, name.trim(), address.trim()).await
    }

    pub async fn update_location<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<Location, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.location_repo
            .update(executor, id, name.trim(), address.trim())
            .await?
            .ok_or(AppError::NotFound(Resource::Location))
    }

    // Bloqueado enquanto algum item apontar para o local (ReferentialError)
    pub async fn delete_location<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match self.location_repo.delete(executor, id).await? {
            0 => Err(AppError::NotFound(Resource::Location)),
            affected => Ok(affected),
        }
    }
}

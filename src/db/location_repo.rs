// src/db/location_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::still_referenced,
        error::{AppError, Resource},
    },
    models::location::Location,
};

#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Location>, AppError> {
        let locations =
            sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(locations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(location)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        address: &str,
    ) -> Result<Location, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let location = sqlx::query_as::<_, Location>(
            "INSERT INTO locations (name, address) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(address)
        .fetch_one(executor)
        .await?;
        Ok(location)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<Option<Location>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = $2, address = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .fetch_optional(executor)
        .await?;
        Ok(location)
    }

    // Local em uso por algum item -> a FK bloqueia e devolvemos ReferentialError
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(still_referenced(Resource::Location))?;
        Ok(result.rows_affected())
    }
}

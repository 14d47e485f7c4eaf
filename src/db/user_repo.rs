// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_unique_violation, still_referenced},
        error::{AppError, Resource},
    },
    models::auth::{User, UserStatus},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras usam a pool principal
    // ---

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn list_by_status(&self, status: UserStatus) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // ---
    // Escritas recebem o executor (pool ou transação)
    // ---

    // Auto-cadastro: sempre nasce STAZ e pendente
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role, status)
            VALUES ($1, $2, 'STAZ', 'pending')
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, AppError::UsernameAlreadyExists))
    }

    // Bootstrap do primeiro gerente. Ele aprova a si mesmo para manter
    // approved_by/approved_at coerentes com o status.
    pub async fn create_active_manager<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            WITH new_user AS (SELECT gen_random_uuid() AS id)
            INSERT INTO users (id, username, password_hash, role, status, approved_by, approved_at)
            SELECT id, $1, $2, 'MANAGER', 'active', id, now() FROM new_user
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, AppError::UsernameAlreadyExists))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(still_referenced(Resource::User))?;
        Ok(result.rows_affected())
    }
}

// src/services/user_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::UserRepository,
    models::auth::{Claims, User, UserStatus},
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    // STAZ só enxerga contas ativas; o gerente vê todas
    pub async fn list_visible(&self, viewer: &Claims) -> Result<Vec<User>, AppError> {
        if viewer.is_manager() {
            self.user_repo.list_all().await
        } else {
            self.user_repo.list_by_status(UserStatus::Active).await
        }
    }

    pub async fn list_pending(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_by_status(UserStatus::Pending).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    pub async fn delete_user<'e, E>(
        &self,
        executor: E,
        actor: &Claims,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if actor.user_id == id {
            return Err(AppError::CannotDeleteSelf);
        }

        let deleted = self.user_repo.delete(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(Resource::User));
        }

        tracing::info!("🗑️ Usuário {} removido por {}", id, actor.user_name);
        Ok(deleted)
    }
}

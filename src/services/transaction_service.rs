// src/services/transaction_service.rs

use sqlx::{Acquire, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::{InventoryRepository, TransactionRepository},
    models::transaction::{NewTransaction, Transaction, TransactionStatus, TransactionView},
};

#[derive(Clone)]
pub struct TransactionService {
    transaction_repo: TransactionRepository,
    inventory_repo: InventoryRepository,
}

impl TransactionService {
    pub fn new(transaction_repo: TransactionRepository, inventory_repo: InventoryRepository) -> Self {
        Self { transaction_repo, inventory_repo }
    }

    pub async fn list_transactions(&self) -> Result<Vec<TransactionView>, AppError> {
        self.transaction_repo.list_views().await
    }

    pub async fn list_pending(&self) -> Result<Vec<TransactionView>, AppError> {
        self.transaction_repo
            .list_views_by_status(TransactionStatus::Pending)
            .await
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<TransactionView, AppError> {
        self.transaction_repo
            .find_view(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Transaction))
    }

    // Registra a movimentação como pendente. O saldo do item NÃO é alterado aqui
    // nem na aprovação; o estoque só muda pela edição do item.
    pub async fn create_transaction<'e, E>(
        &self,
        executor: E,
        new_tx: NewTransaction,
    ) -> Result<Transaction, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if !self.inventory_repo.exists(&mut *tx, new_tx.inventory_id).await? {
            return Err(AppError::MissingReference(Resource::InventoryItem));
        }

        let created = self.transaction_repo.create(&mut *tx, &new_tx).await?;
        tx.commit().await?;

        tracing::info!(
            "📦 Transação {} ({:?} {}) aguardando aprovação",
            created.id,
            created.kind,
            created.quantity
        );
        Ok(created)
    }
}

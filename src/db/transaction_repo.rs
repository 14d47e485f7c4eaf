// src/db/transaction_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{missing_reference, violated_constraint},
        error::{AppError, Resource},
    },
    models::transaction::{NewTransaction, Transaction, TransactionStatus, TransactionView},
};

// Base da listagem: junta o item e os nomes de quem criou/aprovou
const VIEW_SELECT: &str = r#"
    SELECT
        t.id, t.inventory_id, i.name AS inventory_name, i.unit,
        t.quantity, t.kind, t.status, t.date, t.note,
        t.created_by, creator.username AS created_by_name,
        t.approved_by, approver.username AS approved_by_name,
        t.approved_at, t.created_at
    FROM transactions t
    JOIN inventories i ON i.id = t.inventory_id
    JOIN users creator ON creator.id = t.created_by
    LEFT JOIN users approver ON approver.id = t.approved_by
"#;

// Autor apagado com o token ainda válido
const CREATED_BY_FKEY: &str = "transactions_created_by_fkey";

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_views(&self) -> Result<Vec<TransactionView>, AppError> {
        let sql = format!("{VIEW_SELECT} ORDER BY t.date DESC, t.created_at DESC");
        let rows = sqlx::query_as::<_, TransactionView>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_views_by_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<TransactionView>, AppError> {
        let sql = format!("{VIEW_SELECT} WHERE t.status = $1 ORDER BY t.created_at DESC");
        let rows = sqlx::query_as::<_, TransactionView>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_view(&self, id: Uuid) -> Result<Option<TransactionView>, AppError> {
        let sql = format!("{VIEW_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TransactionView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // Toda transação nasce pendente; só o gerente muda o status
    pub async fn create<'e, E>(
        &self,
        executor: E,
        new_tx: &NewTransaction,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (inventory_id, quantity, kind, status, date, note, created_by)
            VALUES ($1, $2, $3, 'pending', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new_tx.inventory_id)
        .bind(new_tx.quantity)
        .bind(new_tx.kind)
        .bind(new_tx.date)
        .bind(new_tx.note.as_deref())
        .bind(new_tx.created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some(CREATED_BY_FKEY) {
                AppError::InvalidToken
            } else {
                missing_reference(Resource::InventoryItem)(e)
            }
        })?;
        Ok(created)
    }
}

// src/db/approval_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::approval::{ApprovalOutcome, ApprovalTarget, PENDING},
};

// Leitura e escrita do status de aprovação, comum a usuários e transações.
// O nome da tabela vem de um enum fechado, nunca da requisição.
#[derive(Clone, Default)]
pub struct ApprovalRepository;

impl ApprovalRepository {
    pub fn new() -> Self {
        Self
    }

    /// Lê o status atual travando a linha até o fim da transação.
    pub async fn lock_status<'e, E>(
        &self,
        executor: E,
        target: ApprovalTarget,
        id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT status::text FROM {} WHERE id = $1 FOR UPDATE",
            target.table()
        );
        let status = sqlx::query_scalar::<_, String>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(status)
    }

    /// Aplica a decisão apenas se a linha ainda estiver pendente.
    pub async fn apply_decision<'e, E>(
        &self,
        executor: E,
        target: ApprovalTarget,
        id: Uuid,
        new_status: &str,
        approved_by: Uuid,
    ) -> Result<Option<ApprovalOutcome>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let touch = if target.touches_updated_at() {
            ", updated_at = now()"
        } else {
            ""
        };
        let sql = format!(
            r#"
            UPDATE {table}
            SET status = $1::{status_type}, approved_by = $2, approved_at = now(){touch}
            WHERE id = $3 AND status = '{PENDING}'
            RETURNING id, status::text AS status, approved_by, approved_at
            "#,
            table = target.table(),
            status_type = target.status_type(),
        );
        let outcome = sqlx::query_as::<_, ApprovalOutcome>(&sql)
            .bind(new_status)
            .bind(approved_by)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(outcome)
    }
}

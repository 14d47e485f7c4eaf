// src/models/transaction.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
}

// Movimento de estoque (entrada/saída) aguardando ou já decidido pelo gerente
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub inventory_id: Uuid,
    #[schema(example = 10)]
    pub quantity: Decimal,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem: transação + nome do item + quem criou/aprovou
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: Uuid,
    pub inventory_id: Uuid,
    pub inventory_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub approved_by: Option<Uuid>,
    pub approved_by_name: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub inventory_id: Uuid,
    pub quantity: Decimal,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_by: Uuid,
}

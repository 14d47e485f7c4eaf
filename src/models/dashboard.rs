// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// 1. Cards do topo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_items: i64,
    pub active_items: i64,
    pub total_quantity: Decimal,
    pub total_locations: i64,
    pub pending_transactions: i64,
    pub pending_users: i64,
}

// 2. Gráfico de pizza por categoria
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub item_count: i64,
    pub total_quantity: Decimal,
}

// 3. Série diária de entradas/saídas (últimos 30 dias)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyMovement {
    #[schema(example = "2025-01-31")]
    pub date: String,
    pub total_in: Decimal,
    pub total_out: Decimal,
}

// 4. Ranking de estoque
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopStockEntry {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
}

// 5. Ranking de movimentação
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopMovedEntry {
    pub id: Uuid,
    pub name: String,
    pub total_moved: Decimal,
    pub transaction_count: i64,
}

// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
}

// --- Item de estoque (tabela 'inventories') ---
// A quantidade só muda pela edição direta do item; transações aprovadas não mexem nela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Beras Premium 5kg")]
    pub name: String,
    #[schema(example = "Sembako")]
    pub category: String,
    #[schema(example = 120)]
    pub quantity: Decimal,
    #[schema(example = "sak")]
    pub unit: String,
    pub status: ItemStatus,
    pub location_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Campos editáveis, já validados pelo handler
#[derive(Debug, Clone)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
    pub status: ItemStatus,
    pub location_id: Option<Uuid>,
}

// src/handlers.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod locations;
pub mod reports;
pub mod transactions;
pub mod users;

// Resposta padrão dos DELETE
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub message: String,
    pub id: Uuid,
    #[schema(example = 1)]
    pub affected: u64,
}

impl DeletedResponse {
    pub fn new(store: &I18nStore, locale: &Locale, key: &str, id: Uuid, affected: u64) -> Self {
        Self {
            message: store.message(&locale.0, key),
            id,
            affected,
        }
    }
}

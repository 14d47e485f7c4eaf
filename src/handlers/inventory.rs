// src/handlers/inventory.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::ApiError,
        validation::{validate_not_blank, validate_not_negative},
    },
    config::AppState,
    handlers::DeletedResponse,
    middleware::{
        i18n::Locale,
        rbac::{AnyStaff, ManagerOnly, RequireRole},
        validated_json::ValidatedJson,
        validated_path::ValidatedPath,
    },
    models::inventory::{InventoryDraft, InventoryItem, ItemStatus},
};

// ---
// Payload: InventoryPayload (criação e edição usam o mesmo corpo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Beras Premium 5kg")]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Sembako")]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 120)]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "sak")]
    pub unit: String,

    #[serde(default)] // Se o JSON não tiver esse campo, assume 'active'
    pub status: ItemStatus,

    pub location_id: Option<Uuid>,
}

impl InventoryPayload {
    fn into_draft(self) -> InventoryDraft {
        InventoryDraft {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            status: self.status,
            location_id: self.location_id,
        }
    }
}

// GET /api/inventory (público)
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses((status = 200, description = "Itens de estoque", body = [InventoryItem]))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .inventory_service
        .list_items()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(items))
}

// GET /api/inventory/{id} (público)
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item encontrado", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    locale: Locale,
    ValidatedPath(item_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .inventory_service
        .get_item(item_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(item))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = InventoryPayload,
    responses(
        (status = 201, description = "Item criado", body = InventoryItem),
        (status = 400, description = "Dados inválidos ou local inexistente"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AnyStaff>,
    ValidatedJson(payload): ValidatedJson<InventoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .inventory_service
        .create_item(&app_state.db_pool, payload.into_draft())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    request_body = InventoryPayload,
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItem),
        (status = 400, description = "Dados inválidos ou local inexistente"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
    ValidatedPath(item_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<InventoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .inventory_service
        .update_item(&app_state.db_pool, item_id, payload.into_draft())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(item))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item removido", body = DeletedResponse),
        (status = 400, description = "Item possui transações"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
    ValidatedPath(item_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = app_state
        .inventory_service
        .delete_item(&app_state.db_pool, item_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeletedResponse::new(
        &app_state.i18n_store,
        &locale,
        "inventory_deleted",
        item_id,
        affected,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_defaults_to_active_and_text_is_trimmed() {
        let payload: InventoryPayload = serde_json::from_value(json!({
            "name": "  Gula Pasir ",
            "category": "Sembako",
            "quantity": 10,
            "unit": "kg"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let draft = payload.into_draft();
        assert_eq!(draft.name, "Gula Pasir");
        assert_eq!(draft.status, ItemStatus::Active);
        assert!(draft.location_id.is_none());
    }

    #[test]
    fn negative_quantity_and_blank_name_are_rejected() {
        let payload: InventoryPayload = serde_json::from_value(json!({
            "name": "   ",
            "category": "Sembako",
            "quantity": -1,
            "unit": "kg",
            "status": "inactive"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("quantity"));
    }
}

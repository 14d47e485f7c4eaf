// src/handlers/transactions.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::ApiError, validation::validate_positive},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AnyStaff, ManagerOnly, RequireRole},
        validated_json::ValidatedJson,
        validated_path::ValidatedPath,
    },
    models::{
        approval::{ApprovalOutcome, ApprovalPayload, ApprovalTarget},
        transaction::{NewTransaction, Transaction, TransactionKind, TransactionView},
    },
};

// ---
// Payload: CreateTransactionPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub inventory_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 10)]
    pub quantity: Decimal,

    pub kind: TransactionKind,

    // Sem data, vale o dia de hoje
    pub date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "The note is too long."))]
    pub note: Option<String>,
}

impl CreateTransactionPayload {
    fn into_new(self, created_by: Uuid) -> NewTransaction {
        NewTransaction {
            inventory_id: self.inventory_id,
            quantity: self.quantity,
            kind: self.kind,
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_by,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "Histórico de transações", body = [TransactionView]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .transaction_service
        .list_transactions()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/transactions/pending",
    tag = "Transactions",
    responses(
        (status = 200, description = "Transações aguardando aprovação", body = [TransactionView]),
        (status = 403, description = "Apenas gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_pending_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .transaction_service
        .list_pending()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = Uuid, Path, description = "ID da transação")),
    responses(
        (status = 200, description = "Transação encontrada", body = TransactionView),
        (status = 404, description = "Transação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    ValidatedPath(transaction_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = app_state
        .transaction_service
        .get_transaction(transaction_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(row))
}

// POST /api/transactions: entra como pendente, o estoque não muda
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Transação registrada como pendente", body = Transaction),
        (status = 400, description = "Dados inválidos ou item inexistente"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyStaff>,
    ValidatedJson(payload): ValidatedJson<CreateTransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = app_state
        .transaction_service
        .create_transaction(&app_state.db_pool, payload.into_new(guard.user.user_id))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/transactions/{id}/approve
#[utoipa::path(
    put,
    path = "/api/transactions/{id}/approve",
    tag = "Transactions",
    request_body = ApprovalPayload,
    params(("id" = Uuid, Path, description = "ID da transação pendente")),
    responses(
        (status = 200, description = "Decisão registrada", body = ApprovalOutcome),
        (status = 400, description = "Ação inválida"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Não encontrada ou já processada")
    ),
    security(("api_jwt" = []))
)]
pub async fn decide_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ManagerOnly>,
    ValidatedPath(transaction_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<ApprovalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .approval_service
        .decide(
            &app_state.db_pool,
            ApprovalTarget::Transaction,
            transaction_id,
            &payload.action,
            &guard.user,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_date_defaults_to_today_and_blank_note_is_dropped() {
        let payload: CreateTransactionPayload = serde_json::from_value(json!({
            "inventoryId": Uuid::nil(),
            "quantity": 5,
            "kind": "out",
            "note": "   "
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let author = Uuid::new_v4();
        let new_tx = payload.into_new(author);
        assert_eq!(new_tx.date, Utc::now().date_naive());
        assert_eq!(new_tx.kind, TransactionKind::Out);
        assert_eq!(new_tx.created_by, author);
        assert!(new_tx.note.is_none());
    }

    #[test]
    fn quantity_must_be_positive() {
        for quantity in [0, -3] {
            let payload: CreateTransactionPayload = serde_json::from_value(json!({
                "inventoryId": Uuid::nil(),
                "quantity": quantity,
                "kind": "in",
                "date": "2025-01-15"
            }))
            .unwrap();
            let errors = payload.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("quantity"));
        }
    }

    #[test]
    fn unknown_kind_is_a_body_error() {
        let parsed = serde_json::from_value::<CreateTransactionPayload>(json!({
            "inventoryId": Uuid::nil(),
            "quantity": 1,
            "kind": "sideways"
        }));
        assert!(parsed.is_err());
    }
}

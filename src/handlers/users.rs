// src/handlers/users.rs

use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::DeletedResponse,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{ManagerOnly, RequireRole},
        validated_json::ValidatedJson,
        validated_path::ValidatedPath,
    },
    models::{
        approval::{ApprovalOutcome, ApprovalPayload, ApprovalTarget},
        auth::User,
    },
};

// GET /api/users
// Gerente vê todo mundo; STAZ só vê contas ativas
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de usuários", body = [User]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list_visible(&claims)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(users))
}

// GET /api/users/request
#[utoipa::path(
    get,
    path = "/api/users/request",
    tag = "Users",
    responses(
        (status = 200, description = "Cadastros aguardando aprovação", body = [User]),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Apenas gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_user_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let pending = app_state
        .user_service
        .list_pending()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(pending))
}

// PUT /api/users/request/{id}/approve
#[utoipa::path(
    put,
    path = "/api/users/request/{id}/approve",
    tag = "Users",
    request_body = ApprovalPayload,
    params(("id" = Uuid, Path, description = "ID do usuário pendente")),
    responses(
        (status = 200, description = "Decisão registrada", body = ApprovalOutcome),
        (status = 400, description = "Ação inválida"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Não encontrado ou já processado")
    ),
    security(("api_jwt" = []))
)]
pub async fn decide_user_request(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ManagerOnly>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<ApprovalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .approval_service
        .decide(
            &app_state.db_pool,
            ApprovalTarget::User,
            user_id,
            &payload.action,
            &guard.user,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(outcome))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário removido", body = DeletedResponse),
        (status = 400, description = "Auto-exclusão ou usuário ainda referenciado"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ManagerOnly>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = app_state
        .user_service
        .delete_user(&app_state.db_pool, &guard.user, user_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeletedResponse::new(
        &app_state.i18n_store,
        &locale,
        "user_deleted",
        user_id,
        affected,
    )))
}

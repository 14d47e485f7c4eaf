// src/handlers/locations.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::ApiError, validation::validate_not_blank},
    config::AppState,
    handlers::DeletedResponse,
    middleware::{
        i18n::Locale,
        rbac::{AnyStaff, ManagerOnly, RequireRole},
        validated_json::ValidatedJson,
        validated_path::ValidatedPath,
    },
    models::location::Location,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Gudang Utama")]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Jl. Merdeka No. 1, Bandung")]
    pub address: String,
}

#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "Locations",
    responses((status = 200, description = "Locais cadastrados", body = [Location]))
)]
pub async fn list_locations(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let locations = app_state
        .location_service
        .list_locations()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(locations))
}

#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    tag = "Locations",
    params(("id" = Uuid, Path, description = "ID do local")),
    responses(
        (status = 200, description = "Local encontrado", body = Location),
        (status = 404, description = "Local não encontrado")
    )
)]
pub async fn get_location(
    State(app_state): State<AppState>,
    locale: Locale,
    ValidatedPath(location_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .location_service
        .get_location(location_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(location))
}

#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "Locations",
    request_body = LocationPayload,
    responses(
        (status = 201, description = "Local criado", body = Location),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AnyStaff>,
    ValidatedJson(payload): ValidatedJson<LocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .location_service
        .create_location(&app_state.db_pool, &payload.name, &payload.address)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(location)))
}

#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    tag = "Locations",
    request_body = LocationPayload,
    params(("id" = Uuid, Path, description = "ID do local")),
    responses(
        (status = 200, description = "Local atualizado", body = Location),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
    ValidatedPath(location_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<LocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .location_service
        .update_location(&app_state.db_pool, location_id, &payload.name, &payload.address)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(location))
}

// Bloqueado enquanto houver itens no local
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    tag = "Locations",
    params(("id" = Uuid, Path, description = "ID do local")),
    responses(
        (status = 200, description = "Local removido", body = DeletedResponse),
        (status = 400, description = "Local ainda possui itens"),
        (status = 403, description = "Apenas gerentes"),
        (status = 404, description = "Local não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
    ValidatedPath(location_id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = app_state
        .location_service
        .delete_location(&app_state.db_pool, location_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeletedResponse::new(
        &app_state.i18n_store,
        &locale,
        "location_deleted",
        location_id,
        affected,
    )))
}

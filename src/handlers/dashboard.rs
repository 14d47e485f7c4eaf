// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    // Importamos os models para referenciar no Swagger
    models::dashboard::{
        CategoryTotal, DailyMovement, DashboardSummary, TopMovedEntry, TopStockEntry,
    },
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais de estoque e pendências", body = DashboardSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/categories
#[utoipa::path(
    get,
    path = "/api/dashboard/categories",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Quantidade por categoria", body = [CategoryTotal]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .dashboard_service
        .get_category_totals()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

// GET /api/dashboard/daily
#[utoipa::path(
    get,
    path = "/api/dashboard/daily",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Entradas e saídas aprovadas dos últimos 30 dias", body = [DailyMovement]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_daily(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .dashboard_service
        .get_daily_movements()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

// GET /api/dashboard/top-stock
#[utoipa::path(
    get,
    path = "/api/dashboard/top-stock",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Itens ativos com maior estoque", body = [TopStockEntry]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_stock(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .dashboard_service
        .get_top_stock()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

// GET /api/dashboard/top-moved
#[utoipa::path(
    get,
    path = "/api/dashboard/top-moved",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Itens mais movimentados", body = [TopMovedEntry]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_moved(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .dashboard_service
        .get_top_moved()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

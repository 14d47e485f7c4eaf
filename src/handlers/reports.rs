// src/handlers/reports.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ManagerOnly, RequireRole},
    },
};

#[utoipa::path(
    get,
    path = "/api/reports/transactions",
    tag = "Reports",
    responses(
        (status = 200, description = "Relatório de transações em PDF (application/pdf)"),
        (status = 403, description = "Apenas gerentes"),
        (status = 500, description = "Falha ao gerar o PDF")
    ),
    security(("api_jwt" = []))
)]
pub async fn transactions_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ManagerOnly>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .report_service
        .transactions_pdf()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let disposition = format!(
        "attachment; filename=\"laporan_transaksi_{}.pdf\"",
        Utc::now().format("%Y%m%d")
    );
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, pdf_bytes).into_response())
}

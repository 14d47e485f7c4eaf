// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, validated_json::ValidatedJson},
    models::auth::{AuthResponse, LoginUserPayload, RegisterResponse, RegisterUserPayload, User},
};

// Handler de registro: a conta nasce STAZ/pendente e não recebe token
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Cadastro recebido, aguardando aprovação", body = RegisterResponse),
        (status = 400, description = "Dados inválidos ou senhas diferentes"),
        (status = 409, description = "Username já existe")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    ValidatedJson(payload): ValidatedJson<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .auth_service
        .register_user(&payload.username, &payload.password, &payload.conf_password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let response = RegisterResponse {
        message: app_state.i18n_store.message(&locale.0, "registration_pending"),
        user,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 400, description = "Senha incorreta"),
        (status = 403, description = "Conta pendente ou rejeitada"),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    ValidatedJson(payload): ValidatedJson<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let response = app_state
        .auth_service
        .login_user(payload.username.trim(), &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(response)))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Dados do usuário autenticado", body = User),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .get_user(claims.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(user))
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    models::auth::UserStatus,
};

// Recurso afetado pelo erro. Serve para escolher a mensagem certa no catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    InventoryItem,
    Location,
    Transaction,
}

impl Resource {
    pub fn slug(self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::InventoryItem => "inventory",
            Resource::Location => "location",
            Resource::Transaction => "transaction",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

// Erro de domínio. Os serviços e repositórios só conhecem este tipo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("One or more fields are invalid")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid URL parameter: {0}")]
    InvalidPath(String),

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Invalid action '{0}', expected 'approve' or 'reject'")]
    InvalidAction(String),

    #[error("Wrong password")]
    InvalidCredentials,

    #[error("Referenced {0} does not exist")]
    MissingReference(Resource),

    #[error("The {0} is still referenced by other records")]
    ReferentialError(Resource),

    #[error("A user cannot delete their own account")]
    CannotDeleteSelf,

    #[error("Authentication token is missing")]
    MissingToken,

    #[error("Authentication token is invalid or expired")]
    InvalidToken,

    #[error("Insufficient role for this action")]
    Forbidden,

    #[error("Account is not active (status: {0})")]
    AccountNotActive(UserStatus),

    #[error("The {0} was not found")]
    NotFound(Resource),

    #[error("Request not found or already processed")]
    NotFoundOrAlreadyProcessed,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Report rendering failed: {0}")]
    ReportError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidPath(_)
            | AppError::PasswordMismatch
            | AppError::InvalidAction(_)
            | AppError::InvalidCredentials
            | AppError::MissingReference(_)
            | AppError::ReferentialError(_)
            | AppError::CannotDeleteSelf => StatusCode::BAD_REQUEST,
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::AccountNotActive(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::NotFoundOrAlreadyProcessed => StatusCode::NOT_FOUND,
            AppError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_)
            | AppError::ReportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Chave da mensagem nos catálogos de `locales/`.
    pub fn message_key(&self) -> String {
        let key = match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::InvalidPath(_) => "invalid_path",
            AppError::PasswordMismatch => "password_mismatch",
            AppError::InvalidAction(_) => "invalid_action",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::MissingReference(resource) => {
                return format!("{}_reference_missing", resource.slug());
            }
            AppError::ReferentialError(resource) => return format!("{}_in_use", resource.slug()),
            AppError::CannotDeleteSelf => "cannot_delete_self",
            AppError::MissingToken => "missing_token",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::AccountNotActive(UserStatus::Rejected) => "account_rejected",
            AppError::AccountNotActive(_) => "account_pending",
            AppError::NotFound(resource) => return format!("{}_not_found", resource.slug()),
            AppError::NotFoundOrAlreadyProcessed => "not_found_or_processed",
            AppError::UsernameAlreadyExists => "username_taken",
            _ => "internal_error",
        };
        key.to_string()
    }

    // Converte para a resposta HTTP no idioma pedido pelo cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let message = store
            .translate(&locale.0, &self.message_key())
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string());

        let details = match &self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            AppError::InvalidBody(reason) | AppError::InvalidPath(reason) => {
                Some(Value::String(reason.clone()))
            }
            _ if status.is_server_error() => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                // A mensagem original vai junto para facilitar o diagnóstico no frontend.
                Some(Value::String(self.to_string()))
            }
            _ => None,
        };

        ApiError {
            status,
            message,
            details,
        }
    }
}

fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

// Erro pronto para a resposta HTTP: `{ "message": ..., "details": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "message": self.message, "details": details }),
            None => json!({ "message": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Sem contexto de idioma (ex.: fora de um handler), responde com a mensagem padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::fallback())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn sample_errors() -> Vec<AppError> {
        vec![
            AppError::ValidationError(ValidationErrors::new()),
            AppError::InvalidBody("x".into()),
            AppError::InvalidPath("id".into()),
            AppError::PasswordMismatch,
            AppError::InvalidAction("maybe".into()),
            AppError::InvalidCredentials,
            AppError::MissingReference(Resource::Location),
            AppError::MissingReference(Resource::InventoryItem),
            AppError::ReferentialError(Resource::Location),
            AppError::ReferentialError(Resource::InventoryItem),
            AppError::ReferentialError(Resource::User),
            AppError::CannotDeleteSelf,
            AppError::MissingToken,
            AppError::InvalidToken,
            AppError::Forbidden,
            AppError::AccountNotActive(UserStatus::Pending),
            AppError::AccountNotActive(UserStatus::Rejected),
            AppError::NotFound(Resource::User),
            AppError::NotFound(Resource::InventoryItem),
            AppError::NotFound(Resource::Location),
            AppError::NotFound(Resource::Transaction),
            AppError::NotFoundOrAlreadyProcessed,
            AppError::UsernameAlreadyExists,
            AppError::ReportError("font".into()),
        ]
    }

    #[test]
    fn every_error_has_a_message_in_each_catalog() {
        let store = I18nStore::load().unwrap();
        for lang in ["en", "id"] {
            for err in sample_errors() {
                let key = err.message_key();
                assert!(
                    store.translate_exact(lang, &key).is_some(),
                    "missing '{key}' in {lang}"
                );
            }
        }
    }

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(AppError::PasswordMismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ReferentialError(Resource::Location).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::AccountNotActive(UserStatus::Pending).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::NotFoundOrAlreadyProcessed.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UsernameAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn pending_account_message_mentions_pending_approval() {
        let store = I18nStore::load().unwrap();
        let api = AppError::AccountNotActive(UserStatus::Pending)
            .to_api_error(&Locale("en".into()), &store);
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert!(api.message.contains("pending approval"));
        assert!(api.details.is_none());
    }

    #[test]
    fn messages_follow_the_requested_language() {
        let store = I18nStore::load().unwrap();
        let api = AppError::UsernameAlreadyExists.to_api_error(&Locale("id".into()), &store);
        assert_eq!(api.message, "Username sudah digunakan.");

        // Idioma sem catálogo cai no inglês
        let api = AppError::UsernameAlreadyExists.to_api_error(&Locale("fr".into()), &store);
        assert_eq!(api.message, "This username is already taken.");
    }

    #[test]
    fn server_errors_echo_the_underlying_message() {
        let store = I18nStore::load().unwrap();
        let api = AppError::DatabaseError(sqlx::Error::PoolTimedOut)
            .to_api_error(&Locale::default(), &store);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        let details = api.details.unwrap();
        assert!(details.as_str().unwrap().contains("Database error"));
    }

    #[test]
    fn validation_errors_are_reported_per_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("Username is required.".into());
        errors.add("username", err);

        let store = I18nStore::load().unwrap();
        let api = AppError::ValidationError(errors).to_api_error(&Locale::default(), &store);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api.details.unwrap()["username"][0].as_str(),
            Some("Username is required.")
        );
    }
}

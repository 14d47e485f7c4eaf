// src/middleware/validated_json.rs

use axum::{
    extract::{FromRef, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

/// JSON desserializado e validado. Corpo inválido e campos inválidos viram 400
/// no mesmo formato `{ message, details }` dos outros erros.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_headers(req.headers());

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| {
                AppError::InvalidBody(e.body_text()).to_api_error(&locale, &app_state.i18n_store)
            })?;

        value
            .validate()
            .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

        Ok(ValidatedJson(value))
    }
}

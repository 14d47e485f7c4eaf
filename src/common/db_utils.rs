// src/common/db_utils.rs

use sqlx::error::DatabaseError;
use validator::{ValidationError, ValidationErrors};

use crate::common::error::{AppError, Resource};

// SQLSTATE 22003: valor não cabe no NUMERIC(14, 3)
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

// ---
// Tradução de violações de constraint do Postgres para erros de domínio
// ---

/// Violação de chave estrangeira vira `on_violation`; quantidade fora da coluna vira
/// erro de validação; o resto segue como erro de banco.
pub(crate) fn map_fk_violation(e: sqlx::Error, on_violation: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if is_quantity_rejection(&**db_err) {
            return quantity_out_of_range();
        }
        if db_err.is_foreign_key_violation() {
            return on_violation;
        }
    }
    e.into()
}

/// Usado no DELETE: a linha ainda é referenciada por outra tabela.
pub(crate) fn still_referenced(resource: Resource) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| map_fk_violation(e, AppError::ReferentialError(resource))
}

/// Usado no INSERT/UPDATE: a referência apontada não existe (ex.: foi apagada no meio do caminho).
pub(crate) fn missing_reference(resource: Resource) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| map_fk_violation(e, AppError::MissingReference(resource))
}

/// Nome da constraint violada, quando o banco informa.
pub(crate) fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

pub(crate) fn map_unique_violation(e: sqlx::Error, on_violation: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return on_violation;
        }
    }
    e.into()
}

fn is_quantity_rejection(db_err: &dyn DatabaseError) -> bool {
    if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
        return true;
    }
    db_err.is_check_violation()
        && db_err
            .constraint()
            .is_some_and(|name| name.ends_with("_quantity_check"))
}

fn quantity_out_of_range() -> AppError {
    let mut err = ValidationError::new("range");
    err.message = Some("The quantity is out of range.".into());
    let mut errors = ValidationErrors::new();
    errors.add("quantity", err);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::ErrorKind;
    use std::{borrow::Cow, error::Error as StdError, fmt};

    #[derive(Debug)]
    struct PgFailure {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for PgFailure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "pg error {}", self.code)
        }
    }

    impl StdError for PgFailure {}

    impl DatabaseError for PgFailure {
        fn message(&self) -> &str {
            "pg error"
        }
        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }
        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }
        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }
        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
        fn constraint(&self) -> Option<&str> {
            self.constraint
        }
        // Mesma classificação por SQLSTATE que o driver do Postgres faz
        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn pg(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgFailure { code, constraint }))
    }

    fn is_quantity_error(err: &AppError) -> bool {
        matches!(err, AppError::ValidationError(e) if e.field_errors().contains_key("quantity"))
    }

    #[test]
    fn rounded_to_zero_quantity_is_a_validation_error() {
        let e = pg("23514", Some("transactions_quantity_check"));
        let err = missing_reference(Resource::InventoryItem)(e);
        assert!(is_quantity_error(&err));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn numeric_overflow_is_a_validation_error() {
        let e = pg(NUMERIC_VALUE_OUT_OF_RANGE, None);
        assert!(is_quantity_error(&missing_reference(Resource::Location)(e)));
    }

    #[test]
    fn other_check_violations_stay_server_errors() {
        let e = pg("23514", Some("users_decision_consistent"));
        assert!(matches!(
            missing_reference(Resource::Location)(e),
            AppError::DatabaseError(_)
        ));
    }

    #[test]
    fn foreign_key_violations_map_to_the_given_error() {
        let e = pg("23503", Some("inventories_location_id_fkey"));
        assert_eq!(violated_constraint(&e), Some("inventories_location_id_fkey"));
        assert!(matches!(
            still_referenced(Resource::Location)(e),
            AppError::ReferentialError(Resource::Location)
        ));
    }
}

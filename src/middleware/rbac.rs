// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{Claims, Role},
};

/// 1. O Trait que define quais papéis passam pela rota
pub trait RoleGate: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// 2. O Extractor (Guardião). Já entrega as claims do usuário autenticado.
pub struct RequireRole<G: RoleGate> {
    pub user: Claims,
    _gate: PhantomData<G>,
}

pub fn check_role(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

// 3. Implementação do FromRequestParts
impl<G, S> FromRequestParts<S> for RequireRole<G>
where
    G: RoleGate,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A. Sem token válido -> 401
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        // B. Papel errado -> 403
        check_role(user.user_role, G::allowed()).map_err(|e| {
            let app_state = AppState::from_ref(state);
            e.to_api_error(&Locale::from_headers(&parts.headers), &app_state.i18n_store)
        })?;

        Ok(RequireRole { user, _gate: PhantomData })
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct ManagerOnly;
impl RoleGate for ManagerOnly {
    fn allowed() -> &'static [Role] { &[Role::Manager] }
}

pub struct AnyStaff;
impl RoleGate for AnyStaff {
    fn allowed() -> &'static [Role] { &[Role::Staz, Role::Manager] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_only_rejects_staff() {
        assert!(check_role(Role::Manager, ManagerOnly::allowed()).is_ok());
        assert!(matches!(
            check_role(Role::Staz, ManagerOnly::allowed()),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn any_staff_accepts_both_roles() {
        assert!(check_role(Role::Staz, AnyStaff::allowed()).is_ok());
        assert!(check_role(Role::Manager, AnyStaff::allowed()).is_ok());
    }
}

// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::UserRepository,
    models::auth::{AuthResponse, Claims, User, UserStatus},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl: Duration,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        jwt_secret: String,
        token_ttl: Duration,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, jwt_secret, token_ttl, pool }
    }

    // Auto-cadastro: a conta fica pendente até um gerente aprovar. Não gera token.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        conf_password: &str,
    ) -> Result<User, AppError> {
        // Nenhuma escrita acontece se a confirmação não bater
        if password != conf_password {
            return Err(AppError::PasswordMismatch);
        }

        let hashed_password = hash_password(password).await?;

        let new_user = self.user_repo
            .create_user(&self.pool, username.trim(), &hashed_password)
            .await?;

        tracing::info!("📝 Novo cadastro '{}' aguardando aprovação.", new_user.username);
        Ok(new_user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Pendentes e rejeitados nunca recebem token
        if user.status != UserStatus::Active {
            return Err(AppError::AccountNotActive(user.status));
        }

        let token = self.issue_token(&user)?;
        Ok(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    /// Garante que o gerente configurado no ambiente exista (primeira subida do sistema).
    pub async fn ensure_manager(&self, username: &str, password: &str) -> Result<Option<User>, AppError> {
        if let Some(existing) = self.user_repo.find_by_username(username).await? {
            if !existing.is_active_manager() {
                tracing::warn!(
                    "⚠️ Usuário de bootstrap '{}' já existe mas não é um gerente ativo.",
                    username
                );
            }
            return Ok(None);
        }

        let hashed_password = hash_password(password).await?;
        let manager = self.user_repo
            .create_active_manager(&self.pool, username, &hashed_password)
            .await?;

        tracing::info!("👤 Gerente inicial '{}' criado.", manager.username);
        Ok(Some(manager))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            user_id: user.id,
            user_name: user.username.clone(),
            user_role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        ApprovalRepository, DashboardRepository, InventoryRepository, LocationRepository,
        TransactionRepository, UserRepository,
    },
    services::{
        ApprovalService, AuthService, DashboardService, InventoryService, LocationService,
        ReportService, TransactionService, UserService,
    },
};

// Configuração lida do ambiente (com suporte a .env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub jwt_expiry_hours: i64,
    pub fonts_dir: PathBuf,
    /// Usuário e senha do gerente criado na primeira subida, se configurado.
    pub seed_manager: Option<(String, String)>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let seed_manager = match (
            env::var("SEED_MANAGER_USERNAME").ok(),
            env::var("SEED_MANAGER_PASSWORD").ok(),
        ) {
            (Some(user), Some(pass)) if !user.trim().is_empty() && !pass.is_empty() => {
                Some((user.trim().to_string(), pass))
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            jwt_expiry_hours: parse_var("JWT_EXPIRY_HOURS", 8)?,
            fonts_dir: env::var("FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fonts")),
            seed_manager,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem um valor inválido: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub approval_service: ApprovalService,
    pub user_service: UserService,
    pub inventory_service: InventoryService,
    pub location_service: LocationService,
    pub transaction_service: TransactionService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::new(config, db_pool)
    }

    // --- Monta o gráfico de dependências ---
    pub fn new(config: Config, db_pool: PgPool) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load().context("Catálogo de mensagens inválido")?;

        let user_repo = UserRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let location_repo = LocationRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.jwt_expiry_hours),
            db_pool.clone(),
        );
        let approval_service = ApprovalService::new(ApprovalRepository::new());
        let user_service = UserService::new(user_repo);
        let inventory_service = InventoryService::new(inventory_repo.clone(), location_repo.clone());
        let location_service = LocationService::new(location_repo);
        let transaction_service =
            TransactionService::new(transaction_repo.clone(), inventory_repo);
        let dashboard_service = DashboardService::new(DashboardRepository::new(db_pool.clone()));
        let report_service = ReportService::new(transaction_repo, config.fonts_dir.clone());

        Ok(Self {
            db_pool,
            i18n_store,
            auth_service,
            approval_service,
            user_service,
            inventory_service,
            location_service,
            transaction_service,
            dashboard_service,
            report_service,
        })
    }
}

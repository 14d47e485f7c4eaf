// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{CategoryTotal, DailyMovement, DashboardSummary, TopMovedEntry, TopStockEntry},
};

const TOP_N: i64 = 5;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        // Snapshot consistente dos contadores
        let mut tx = self.pool.begin().await?;

        let (total_items, active_items, total_quantity) =
            sqlx::query_as::<_, (i64, i64, Decimal)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'active'),
                    COALESCE(SUM(quantity), 0)
                FROM inventories
                "#,
            )
            .fetch_one(&mut *tx)
            .await?;

        let total_locations = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
            .fetch_one(&mut *tx)
            .await?;

        let pending_transactions = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE status = 'pending'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let pending_users =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE status = 'pending'")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_items,
            active_items,
            total_quantity,
            total_locations,
            pending_transactions,
            pending_users,
        })
    }

    // 2. Totais por categoria
    pub async fn get_category_totals(&self) -> Result<Vec<CategoryTotal>, AppError> {
        let data = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT
                category,
                COUNT(*) AS item_count,
                COALESCE(SUM(quantity), 0) AS total_quantity
            FROM inventories
            GROUP BY category
            ORDER BY total_quantity DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }

    // 3. Entradas x saídas aprovadas por dia (últimos 30 dias)
    pub async fn get_daily_movements(&self) -> Result<Vec<DailyMovement>, AppError> {
        let data = sqlx::query_as::<_, DailyMovement>(
            r#"
            SELECT
                to_char(date, 'YYYY-MM-DD') AS date,
                COALESCE(SUM(quantity) FILTER (WHERE kind = 'in'), 0) AS total_in,
                COALESCE(SUM(quantity) FILTER (WHERE kind = 'out'), 0) AS total_out
            FROM transactions
            WHERE status = 'approved'
              AND date >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }

    // 4. Itens ativos com mais estoque
    pub async fn get_top_stock(&self) -> Result<Vec<TopStockEntry>, AppError> {
        let data = sqlx::query_as::<_, TopStockEntry>(
            r#"
            SELECT id, name, category, quantity, unit
            FROM inventories
            WHERE status = 'active'
            ORDER BY quantity DESC
            LIMIT $1
            "#,
        )
        .bind(TOP_N)
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }

    // 5. Itens mais movimentados (transações aprovadas)
    pub async fn get_top_moved(&self) -> Result<Vec<TopMovedEntry>, AppError> {
        let data = sqlx::query_as::<_, TopMovedEntry>(
            r#"
            SELECT
                i.id,
                i.name,
                SUM(t.quantity) AS total_moved,
                COUNT(t.id) AS transaction_count
            FROM transactions t
            JOIN inventories i ON i.id = t.inventory_id
            WHERE t.status = 'approved'
            GROUP BY i.id, i.name
            ORDER BY total_moved DESC
            LIMIT $1
            "#,
        )
        .bind(TOP_N)
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }
}

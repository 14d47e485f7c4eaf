// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{CategoryTotal, DailyMovement, DashboardSummary, TopMovedEntry, TopStockEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary().await
    }

    pub async fn get_category_totals(&self) -> Result<Vec<CategoryTotal>, AppError> {
        self.repo.get_category_totals().await
    }

    pub async fn get_daily_movements(&self) -> Result<Vec<DailyMovement>, AppError> {
        self.repo.get_daily_movements().await
    }

    pub async fn get_top_stock(&self) -> Result<Vec<TopStockEntry>, AppError> {
        self.repo.get_top_stock().await
    }

    pub async fn get_top_moved(&self) -> Result<Vec<TopMovedEntry>, AppError> {
        self.repo.get_top_moved().await
    }
}

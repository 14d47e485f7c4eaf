// src/services/report_service.rs

use std::path::PathBuf;

use chrono::Utc;
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::TransactionRepository,
    models::transaction::{TransactionKind, TransactionStatus, TransactionView},
};

const FONT_FAMILY: &str = "Roboto";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub approved_in: Decimal,
    pub approved_out: Decimal,
    pub pending: usize,
    pub rejected: usize,
}

impl ReportTotals {
    // Só transações aprovadas entram nas somas de entrada/saída
    pub fn from_rows(rows: &[TransactionView]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            match (row.status, row.kind) {
                (TransactionStatus::Approved, TransactionKind::In) => acc.approved_in += row.quantity,
                (TransactionStatus::Approved, TransactionKind::Out) => acc.approved_out += row.quantity,
                (TransactionStatus::Pending, _) => acc.pending += 1,
                (TransactionStatus::Rejected, _) => acc.rejected += 1,
            }
            acc
        })
    }
}

#[derive(Clone)]
pub struct ReportService {
    transaction_repo: TransactionRepository,
    fonts_dir: PathBuf,
}

impl ReportService {
    pub fn new(transaction_repo: TransactionRepository, fonts_dir: PathBuf) -> Self {
        Self { transaction_repo, fonts_dir }
    }

    pub async fn transactions_pdf(&self) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados
        let rows = self.transaction_repo.list_views().await?;
        let totals = ReportTotals::from_rows(&rows);

        // 2. Configura o PDF
        // Espera Roboto-Regular/Bold/Italic/BoldItalic.ttf na pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, FONT_FAMILY, None)
            .map_err(|e| {
                AppError::ReportError(format!(
                    "fonte '{}' não encontrada em {}: {}",
                    FONT_FAMILY,
                    self.fonts_dir.display(),
                    e
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title("Jamuku - Laporan Transaksi");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("JAMUKU - LAPORAN TRANSAKSI")
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Dibuat: {}",
            Utc::now().format("%d/%m/%Y %H:%M UTC")
        )));
        doc.push(elements::Break::new(1.5));

        // --- RESUMO ---
        doc.push(elements::Paragraph::new(format!("Total masuk (disetujui): {}", totals.approved_in)));
        doc.push(elements::Paragraph::new(format!("Total keluar (disetujui): {}", totals.approved_out)));
        doc.push(elements::Paragraph::new(format!(
            "Menunggu: {}  |  Ditolak: {}",
            totals.pending, totals.rejected
        )));
        doc.push(elements::Break::new(1.5));

        // --- TABELA ---
        // Pesos: Data (2), Barang (4), Jenis (1), Qtd (2), Status (2), Oleh (2)
        let mut table = elements::TableLayout::new(vec![2, 4, 1, 2, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Tanggal").styled(style_bold))
            .element(elements::Paragraph::new("Barang").styled(style_bold))
            .element(elements::Paragraph::new("Jenis").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Status").styled(style_bold))
            .element(elements::Paragraph::new("Oleh").styled(style_bold))
            .push()
            .map_err(report_error)?;

        for row in rows {
            let kind = match row.kind {
                TransactionKind::In => "IN",
                TransactionKind::Out => "OUT",
            };
            let status = match row.status {
                TransactionStatus::Pending => "pending",
                TransactionStatus::Approved => "approved",
                TransactionStatus::Rejected => "rejected",
            };
            table
                .row()
                .element(elements::Paragraph::new(row.date.format("%d/%m/%Y").to_string()))
                .element(elements::Paragraph::new(row.inventory_name))
                .element(elements::Paragraph::new(kind))
                .element(elements::Paragraph::new(format!("{} {}", row.quantity, row.unit)))
                .element(elements::Paragraph::new(status))
                .element(elements::Paragraph::new(row.created_by_name))
                .push()
                .map_err(report_error)?;
        }

        doc.push(table);

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(report_error)?;

        Ok(buffer)
    }
}

fn report_error(e: genpdf::error::Error) -> AppError {
    AppError::ReportError(e.to_string())
}

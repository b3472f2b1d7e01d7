//! Storage seam for invoice rows.

use crate::models::{InvoiceInput, InvoiceRecord, InvoiceType};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use service_core::error::AppError;
use std::sync::RwLock;
use tracing::{info, instrument};

/// Flat invoice table.
///
/// Implementations assign ids on insert and return period queries ordered by
/// `invoice_date` ascending, ties broken by `id`.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert one invoice. Either the whole row is stored or nothing is.
    async fn insert(&self, input: &InvoiceInput) -> Result<InvoiceRecord, AppError>;

    /// Invoices of one type whose date falls in `(month, year)`.
    /// An unmatched or out-of-range period yields an empty list.
    async fn query_by_type_and_period(
        &self,
        invoice_type: InvoiceType,
        month: i32,
        year: i32,
    ) -> Result<Vec<InvoiceRecord>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// In-process store, used for local runs without Postgres and in tests.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<InvoiceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("Invoice store lock poisoned"))
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    #[instrument(skip(self, input), fields(invoice_number = %input.invoice_number))]
    async fn insert(&self, input: &InvoiceInput) -> Result<InvoiceRecord, AppError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let id = rows.len() as i64 + 1;
        let record = InvoiceRecord::from_input(id, input, Utc::now());
        rows.push(record.clone());

        info!(id = record.id, "Invoice stored in memory");

        Ok(record)
    }

    async fn query_by_type_and_period(
        &self,
        invoice_type: InvoiceType,
        month: i32,
        year: i32,
    ) -> Result<Vec<InvoiceRecord>, AppError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let mut matching: Vec<InvoiceRecord> = rows
            .iter()
            .filter(|r| {
                r.invoice_type == invoice_type
                    && r.invoice_date.month() as i32 == month
                    && r.invoice_date.year() == year
            })
            .cloned()
            .collect();
        matching.sort_by_key(|r| (r.invoice_date, r.id));
        Ok(matching)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.rows.read().map(|_| ()).map_err(|_| poisoned())
    }
}

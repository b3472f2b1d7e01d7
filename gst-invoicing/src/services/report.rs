//! Folds one period's invoice rows into the SALE/PURCHASE report.

use crate::models::{InvoiceRecord, InvoiceReport, InvoiceType, Partition, Period};
use crate::services::store::InvoiceStore;
use service_core::error::AppError;
use tracing::{info, instrument};

/// Partition `rows` by invoice type and sum each partition.
///
/// Rows must already belong to `(month, year)`; they are neither re-filtered
/// nor re-sorted, so each partition keeps the order storage returned.
pub fn build_report<I>(rows: I, month: i32, year: i32) -> InvoiceReport
where
    I: IntoIterator<Item = InvoiceRecord>,
{
    let mut sale = Partition::empty(InvoiceType::Sale);
    let mut purchase = Partition::empty(InvoiceType::Purchase);

    for row in rows {
        let partition = match row.invoice_type {
            InvoiceType::Sale => &mut sale,
            InvoiceType::Purchase => &mut purchase,
        };
        partition.totals.add(&row);
        partition.rows.push(row);
    }

    InvoiceReport {
        period: Period::new(month, year),
        sale,
        purchase,
    }
}

/// Fetch both partitions for a period from storage and fold them.
///
/// Any query failure aborts the whole report.
#[instrument(skip(store))]
pub async fn load_report(
    store: &dyn InvoiceStore,
    month: i32,
    year: i32,
) -> Result<InvoiceReport, AppError> {
    let sales = store
        .query_by_type_and_period(InvoiceType::Sale, month, year)
        .await?;
    let purchases = store
        .query_by_type_and_period(InvoiceType::Purchase, month, year)
        .await?;

    let report = build_report(sales.into_iter().chain(purchases), month, year);

    info!(
        sale_rows = report.sale.len(),
        purchase_rows = report.purchase.len(),
        "Report built"
    );

    Ok(report)
}

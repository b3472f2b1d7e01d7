//! HTTP handlers for gst-invoicing.

pub mod dashboard;
pub mod exports;
pub mod health;
pub mod invoices;
pub mod tax;

use crate::services::metrics::ERRORS_TOTAL;
use service_core::error::AppError;

pub use dashboard::dashboard;
pub use exports::{export_pdf, export_xlsx, report_json};
pub use health::{health_check, metrics, readiness_check};
pub use invoices::{create_invoice, new_invoice_form};
pub use tax::derive_tax;

/// Count the error by kind before it becomes a response.
pub(crate) fn record_error(err: AppError) -> AppError {
    ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
    err
}

use super::record_error;
use crate::dtos::invoices::default_invoice_number;
use crate::dtos::CreateInvoiceForm;
use crate::render::{render_page, InvoiceCreatedTemplate, InvoiceFormTemplate};
use crate::services::metrics::INVOICES_TOTAL;
use crate::startup::AppState;
use axum::{extract::State, response::Html, Form};
use chrono::Utc;
use service_core::error::AppError;
use tracing::{info, instrument};
use validator::Validate;

pub async fn new_invoice_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let page = InvoiceFormTemplate::new(
        now.date_naive().format("%Y-%m-%d").to_string(),
        default_invoice_number(now),
        state.config.tax_mode,
    );

    Ok(Html(render_page(&page).map_err(record_error)?))
}

/// Store one invoice from the create form.
///
/// Tax legs and total are derived server-side; the submitted total is ignored.
#[instrument(
    skip(state, form),
    fields(invoice_number = form.invoice_number.as_deref().unwrap_or(""))
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<CreateInvoiceForm>,
) -> Result<Html<String>, AppError> {
    form.validate().map_err(|e| record_error(e.into()))?;

    let input = form.into_input(state.config.tax_mode, Utc::now());
    let record = state.store.insert(&input).await.map_err(record_error)?;

    INVOICES_TOTAL
        .with_label_values(&[record.invoice_type.as_str()])
        .inc();
    info!(
        id = record.id,
        invoice_type = record.invoice_type.as_str(),
        total = %record.total,
        "Invoice created"
    );

    let page = InvoiceCreatedTemplate {
        id: record.id,
        invoice_number: record.invoice_number,
    };
    Ok(Html(render_page(&page).map_err(record_error)?))
}

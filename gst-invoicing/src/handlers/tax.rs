use crate::dtos::TaxDeriveRequest;
use crate::services::{derive_tax_fields, TaxFields};
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Live recalculation for the invoice form.
pub async fn derive_tax(
    State(state): State<AppState>,
    Json(request): Json<TaxDeriveRequest>,
) -> Json<TaxFields> {
    let (taxable, rate, cgst, sgst, mode) = request.coerce(state.config.tax_mode);
    Json(derive_tax_fields(taxable, rate, cgst, sgst, mode))
}

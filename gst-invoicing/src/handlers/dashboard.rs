use super::exports::render_report;
use super::record_error;
use crate::dtos::PeriodParams;
use crate::render::HtmlRenderer;
use crate::services::load_report;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
};
use chrono::Utc;
use service_core::error::AppError;
use tracing::instrument;

/// Monthly dashboard with both invoice tables.
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Response, AppError> {
    let period = params.resolve(Utc::now().date_naive());
    let report = load_report(state.store.as_ref(), period.month, period.year)
        .await
        .map_err(record_error)?;

    render_report(&HtmlRenderer, &report, false)
}

use super::record_error;
use crate::dtos::PeriodParams;
use crate::models::InvoiceReport;
use crate::render::{PdfRenderer, Renderer, XlsxRenderer};
use crate::services::load_report;
use crate::services::metrics::EXPORTS_TOTAL;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use service_core::error::AppError;
use tracing::{info, instrument};

/// Render `report` and wrap it in a response; downloads get an attachment
/// disposition and are never cached.
pub(crate) fn render_report(
    renderer: &dyn Renderer,
    report: &InvoiceReport,
    attachment: bool,
) -> Result<Response, AppError> {
    let body = renderer.render(report).map_err(record_error)?;
    let size = body.len();

    EXPORTS_TOTAL
        .with_label_values(&[renderer.file_extension()])
        .inc();

    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(renderer.content_type()),
    );

    if attachment {
        let file_name = renderer.file_name(report);
        info!(file_name = %file_name, bytes = size, "Export rendered");
        let disposition =
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
                .map_err(|e| record_error(AppError::InternalError(anyhow::anyhow!(e))))?;
        headers.insert(header::CONTENT_DISPOSITION, disposition);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    }

    Ok(response)
}

async fn export(
    state: &AppState,
    params: &PeriodParams,
    renderer: &dyn Renderer,
) -> Result<Response, AppError> {
    let period = params.resolve(Utc::now().date_naive());
    let report = load_report(state.store.as_ref(), period.month, period.year)
        .await
        .map_err(record_error)?;

    render_report(renderer, &report, true)
}

#[instrument(skip(state))]
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Response, AppError> {
    export(&state, &params, &PdfRenderer).await
}

#[instrument(skip(state))]
pub async fn export_xlsx(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Response, AppError> {
    export(&state, &params, &XlsxRenderer).await
}

/// The report model as JSON.
#[instrument(skip(state))]
pub async fn report_json(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<InvoiceReport>, AppError> {
    let period = params.resolve(Utc::now().date_naive());
    let report = load_report(state.store.as_ref(), period.month, period.year)
        .await
        .map_err(record_error)?;

    EXPORTS_TOTAL.with_label_values(&["json"]).inc();

    Ok(Json(report))
}

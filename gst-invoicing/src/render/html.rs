use super::view::PartitionView;
use super::Renderer;
use crate::models::{InvoiceReport, Period, TaxMode};
use askama::Template;
use service_core::error::AppError;

pub struct MonthOption {
    pub value: i32,
    pub name: &'static str,
    pub selected: bool,
}

pub struct TaxModeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub heading: String,
    pub label: String,
    pub query: String,
    pub year: i32,
    pub months: Vec<MonthOption>,
    pub partitions: Vec<PartitionView>,
}

impl DashboardTemplate {
    pub fn new(report: &InvoiceReport) -> Self {
        let period = report.period;
        Self {
            heading: format!("Invoices for {}", period.label()),
            label: period.label(),
            query: format!("month={}&year={}", period.month, period.year),
            year: period.year,
            months: Period::months()
                .map(|(value, name)| MonthOption {
                    value,
                    name,
                    selected: value == period.month,
                })
                .collect(),
            partitions: report
                .partitions()
                .into_iter()
                .map(PartitionView::from)
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "invoice_form.html")]
pub struct InvoiceFormTemplate {
    pub today: String,
    pub suggested_number: String,
    pub default_rate: &'static str,
    pub tax_modes: Vec<TaxModeOption>,
}

impl InvoiceFormTemplate {
    pub fn new(today: String, suggested_number: String, default_mode: TaxMode) -> Self {
        let option = |mode: TaxMode, label| TaxModeOption {
            value: mode.as_str(),
            label,
            selected: mode == default_mode,
        };
        Self {
            today,
            suggested_number,
            default_rate: "9",
            tax_modes: vec![
                option(TaxMode::RateIsEach, "Rate applies to each of CGST and SGST"),
                option(TaxMode::EqualSplit, "Combined rate split equally"),
            ],
        }
    }
}

#[derive(Template)]
#[template(path = "invoice_created.html")]
pub struct InvoiceCreatedTemplate {
    pub id: i64,
    pub invoice_number: String,
}

/// Renders the monthly dashboard page.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, report: &InvoiceReport) -> Result<Vec<u8>, AppError> {
        render_page(&DashboardTemplate::new(report)).map(String::into_bytes)
    }
}

/// Render any page template, mapping template failures to a 500.
pub fn render_page<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Template rendering failed: {}", e)))
}

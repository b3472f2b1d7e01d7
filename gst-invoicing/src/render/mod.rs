//! Output formats for the monthly invoice report.

pub mod html;
pub mod pdf;
pub mod view;
pub mod xlsx;

use crate::models::InvoiceReport;
use service_core::error::AppError;

pub use html::{
    render_page, DashboardTemplate, HtmlRenderer, InvoiceCreatedTemplate, InvoiceFormTemplate,
};
pub use pdf::PdfRenderer;
pub use xlsx::XlsxRenderer;

/// Turns one report into a complete document.
pub trait Renderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_extension(&self) -> &'static str;

    fn render(&self, report: &InvoiceReport) -> Result<Vec<u8>, AppError>;

    /// `Invoices_<Month>-<Year>.<ext>`
    fn file_name(&self, report: &InvoiceReport) -> String {
        format!("{}.{}", report.period.file_stem(), self.file_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::build_report;

    #[test]
    fn download_names_follow_the_period() {
        let report = build_report(Vec::new(), 2, 2026);

        assert_eq!(PdfRenderer.file_name(&report), "Invoices_February-2026.pdf");
        assert_eq!(XlsxRenderer.file_name(&report), "Invoices_February-2026.xlsx");
    }
}

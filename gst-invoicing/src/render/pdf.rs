use super::view::PartitionView;
use super::Renderer;
use crate::models::InvoiceReport;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use service_core::error::AppError;

// A4 landscape.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 12.0;
const ROW_HEIGHT: f32 = 6.0;
const FONT_SIZE: f32 = 8.0;
// Rough Helvetica advance at FONT_SIZE, used for clipping cell text.
const CHAR_WIDTH: f32 = 1.55;

const SALE_COLUMNS: [f32; 9] = [12.0, 34.0, 24.0, 60.0, 36.0, 30.0, 25.0, 25.0, 27.0];
const PURCHASE_COLUMNS: [f32; 10] = [12.0, 30.0, 22.0, 44.0, 34.0, 36.0, 28.0, 22.0, 22.0, 23.0];

fn pdf_error(e: printpdf::Error) -> AppError {
    AppError::InternalError(anyhow::anyhow!("PDF generation failed: {:?}", e))
}

fn clip(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0) / CHAR_WIDTH).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    clipped.push_str("..");
    clipped
}

/// Cursor over the current page; starts a new page when the bottom margin is reached.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, AppError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", self.pages + 1));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
    }

    /// Returns true when a page break happened.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height < MARGIN {
            self.new_page();
            return true;
        }
        false
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.reserve(size * 0.6);
        self.y -= size * 0.5;
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), &self.bold);
        self.y -= size * 0.3;
    }

    fn paragraph(&mut self, text: &str) {
        self.reserve(ROW_HEIGHT);
        self.y -= ROW_HEIGHT;
        self.layer
            .use_text(text, FONT_SIZE + 1.0, Mm(MARGIN), Mm(self.y), &self.regular);
    }

    fn row(&mut self, cells: &[&str], widths: &[f32], bold: bool) {
        self.y -= ROW_HEIGHT;
        let font = if bold { &self.bold } else { &self.regular };
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            self.layer
                .use_text(clip(cell, *width), FONT_SIZE, Mm(x + 1.0), Mm(self.y), font);
            x += width;
        }
    }

    fn table(&mut self, view: &PartitionView, widths: &[f32]) {
        self.heading(&view.title, 12.0);

        if view.rows.is_empty() {
            self.paragraph(&view.empty_message);
            return;
        }

        self.reserve(ROW_HEIGHT * 2.0);
        self.row(&view.headers, widths, true);
        for row in &view.rows {
            if self.reserve(ROW_HEIGHT) {
                self.row(&view.headers, widths, true);
            }
            self.row(&row.cells(view.invoice_type), widths, false);
        }
        self.reserve(ROW_HEIGHT);
        self.row(&view.total_cells(), widths, true);
        self.y -= ROW_HEIGHT;
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn layout(report: &InvoiceReport) -> Result<PageWriter, AppError> {
    let title = format!("Invoices for {}", report.period.label());
    let mut writer = PageWriter::new(&title)?;

    writer.heading(&title, 16.0);
    writer.table(&PartitionView::from(&report.sale), &SALE_COLUMNS);
    writer.table(&PartitionView::from(&report.purchase), &PURCHASE_COLUMNS);

    Ok(writer)
}

/// Landscape A4 report with one table per invoice type.
pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, report: &InvoiceReport) -> Result<Vec<u8>, AppError> {
        layout(report)?.finish()
    }
}

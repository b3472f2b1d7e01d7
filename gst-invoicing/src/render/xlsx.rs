use super::view::{empty_message, headers};
use super::Renderer;
use crate::models::{InvoiceReport, InvoiceType, Partition};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{DocProperties, Format, Workbook, Worksheet, XlsxError};
use service_core::error::AppError;

const MONEY_FORMAT: &str = "#,##0.00";

fn xlsx_error(e: XlsxError) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Spreadsheet generation failed: {}", e))
}

fn sheet_name(invoice_type: InvoiceType) -> &'static str {
    match invoice_type {
        InvoiceType::Sale => "Sale Invoices",
        InvoiceType::Purchase => "Purchase Invoices",
    }
}

fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn write_partition(sheet: &mut Worksheet, partition: &Partition) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let amount = Format::new().set_num_format(MONEY_FORMAT);
    let bold_amount = Format::new().set_bold().set_num_format(MONEY_FORMAT);
    let is_purchase = partition.invoice_type == InvoiceType::Purchase;

    sheet.set_name(sheet_name(partition.invoice_type))?;

    for (col, header) in headers(partition.invoice_type).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    if partition.is_empty() {
        sheet.write_string(1, 0, empty_message(partition.invoice_type))?;
        sheet.autofit();
        return Ok(());
    }

    let amount_col: u16 = if is_purchase { 6 } else { 5 };
    let mut row_num: u32 = 1;

    for row in &partition.rows {
        sheet.write_number(row_num, 0, row.id as f64)?;
        sheet.write_string(row_num, 1, &row.invoice_number)?;
        sheet.write_string(row_num, 2, row.invoice_date.format("%Y-%m-%d").to_string())?;
        sheet.write_string(row_num, 3, &row.customer_name)?;
        sheet.write_string(row_num, 4, &row.customer_gstin)?;
        if is_purchase {
            sheet.write_string(row_num, 5, &row.commodity)?;
        }
        for (offset, value) in [row.taxable_amount, row.cgst, row.sgst, row.total]
            .into_iter()
            .enumerate()
        {
            sheet.write_number_with_format(
                row_num,
                amount_col + offset as u16,
                money(value),
                &amount,
            )?;
        }
        row_num += 1;
    }

    let totals = &partition.totals;
    sheet.write_string_with_format(row_num, 0, "TOTAL:", &bold)?;
    for (offset, value) in [totals.taxable_amount, totals.cgst, totals.sgst, totals.total]
        .into_iter()
        .enumerate()
    {
        sheet.write_number_with_format(
            row_num,
            amount_col + offset as u16,
            money(value),
            &bold_amount,
        )?;
    }

    sheet.autofit();
    Ok(())
}

/// Workbook with one worksheet per invoice type.
pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
    fn content_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }

    fn file_extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, report: &InvoiceReport) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let properties = DocProperties::new()
            .set_author("GST Invoicing")
            .set_title("Invoices Export");
        workbook.set_properties(&properties);

        for partition in report.partitions() {
            write_partition(workbook.add_worksheet(), partition).map_err(xlsx_error)?;
        }

        workbook.save_to_buffer().map_err(xlsx_error)
    }
}

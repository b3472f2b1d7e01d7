//! Display-ready projection of a report, shared by the HTML and PDF output.

use crate::models::{InvoiceRecord, InvoiceType, Partition};
use crate::utils::format_amount;

pub const SALE_HEADERS: [&str; 9] = [
    "ID",
    "Invoice Number",
    "Invoice Date",
    "Customer Name",
    "GSTIN",
    "Taxable Amount",
    "CGST",
    "SGST",
    "Total",
];

pub const PURCHASE_HEADERS: [&str; 10] = [
    "ID",
    "Invoice Number",
    "Invoice Date",
    "Customer Name",
    "GSTIN",
    "Commodity",
    "Taxable Amount",
    "CGST",
    "SGST",
    "Total",
];

pub fn headers(invoice_type: InvoiceType) -> &'static [&'static str] {
    match invoice_type {
        InvoiceType::Sale => &SALE_HEADERS,
        InvoiceType::Purchase => &PURCHASE_HEADERS,
    }
}

/// `No SALE invoices found for this month/year.`
pub fn empty_message(invoice_type: InvoiceType) -> String {
    format!(
        "No {} invoices found for this month/year.",
        invoice_type.as_str()
    )
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub id: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub customer_name: String,
    pub customer_gstin: String,
    pub commodity: String,
    pub taxable_amount: String,
    pub cgst: String,
    pub sgst: String,
    pub total: String,
}

impl From<&InvoiceRecord> for RowView {
    fn from(row: &InvoiceRecord) -> Self {
        Self {
            id: row.id.to_string(),
            invoice_number: row.invoice_number.clone(),
            invoice_date: row.invoice_date.format("%Y-%m-%d").to_string(),
            customer_name: row.customer_name.clone(),
            customer_gstin: row.customer_gstin.clone(),
            commodity: row.commodity.clone(),
            taxable_amount: format_amount(row.taxable_amount),
            cgst: format_amount(row.cgst),
            sgst: format_amount(row.sgst),
            total: format_amount(row.total),
        }
    }
}

impl RowView {
    /// Cells in header order for the given partition type.
    pub fn cells(&self, invoice_type: InvoiceType) -> Vec<&str> {
        let mut cells = vec![
            self.id.as_str(),
            self.invoice_number.as_str(),
            self.invoice_date.as_str(),
            self.customer_name.as_str(),
            self.customer_gstin.as_str(),
        ];
        if invoice_type == InvoiceType::Purchase {
            cells.push(self.commodity.as_str());
        }
        cells.extend([
            self.taxable_amount.as_str(),
            self.cgst.as_str(),
            self.sgst.as_str(),
            self.total.as_str(),
        ]);
        cells
    }
}

#[derive(Debug, Clone)]
pub struct PartitionView {
    pub invoice_type: InvoiceType,
    pub title: String,
    pub is_purchase: bool,
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub empty_message: String,
    pub total_taxable: String,
    pub total_cgst: String,
    pub total_sgst: String,
    pub total: String,
}

impl From<&Partition> for PartitionView {
    fn from(partition: &Partition) -> Self {
        let invoice_type = partition.invoice_type;
        Self {
            invoice_type,
            title: format!("{} Invoices", invoice_type.as_str()),
            is_purchase: invoice_type == InvoiceType::Purchase,
            headers: headers(invoice_type).to_vec(),
            rows: partition.rows.iter().map(RowView::from).collect(),
            empty_message: empty_message(invoice_type),
            total_taxable: format_amount(partition.totals.taxable_amount),
            total_cgst: format_amount(partition.totals.cgst),
            total_sgst: format_amount(partition.totals.sgst),
            total: format_amount(partition.totals.total),
        }
    }
}

impl PartitionView {
    /// Totals row cells aligned under the amount columns.
    pub fn total_cells(&self) -> Vec<&str> {
        let mut cells = vec![""; self.headers.len() - 4];
        cells[0] = "TOTAL:";
        cells.extend([
            self.total_taxable.as_str(),
            self.total_cgst.as_str(),
            self.total_sgst.as_str(),
            self.total.as_str(),
        ]);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaxMode;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn purchase() -> Partition {
        let row = InvoiceRecord {
            id: 4,
            invoice_number: "P-9".to_string(),
            invoice_type: InvoiceType::Purchase,
            invoice_date: NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
            customer_name: "Supplier".to_string(),
            customer_gstin: "29ABCDE1234F1Z5".to_string(),
            commodity: "Cement".to_string(),
            taxable_amount: Decimal::new(1_250_000, 2),
            tax_rate: Decimal::new(9, 0),
            tax_mode: TaxMode::RateIsEach,
            cgst: Decimal::new(112_500, 2),
            sgst: Decimal::new(112_500, 2),
            total: Decimal::new(1_475_000, 2),
            created_utc: Utc::now(),
        };
        let mut partition = Partition::empty(InvoiceType::Purchase);
        partition.totals.add(&row);
        partition.rows.push(row);
        partition
    }

    #[test]
    fn purchase_rows_include_commodity() {
        let view = PartitionView::from(&purchase());

        assert_eq!(view.headers.len(), 10);
        assert_eq!(
            view.rows[0].cells(InvoiceType::Purchase),
            vec![
                "4",
                "P-9",
                "2026-02-07",
                "Supplier",
                "29ABCDE1234F1Z5",
                "Cement",
                "12,500.00",
                "1,125.00",
                "1,125.00",
                "14,750.00"
            ]
        );
    }

    #[test]
    fn totals_row_lines_up_with_headers() {
        let view = PartitionView::from(&purchase());
        let cells = view.total_cells();

        assert_eq!(cells.len(), view.headers.len());
        assert_eq!(cells[0], "TOTAL:");
        assert_eq!(cells[cells.len() - 1], "14,750.00");
    }

    #[test]
    fn empty_message_names_the_type() {
        assert_eq!(
            empty_message(InvoiceType::Sale),
            "No SALE invoices found for this month/year."
        );
        assert_eq!(
            PartitionView::from(&Partition::empty(InvoiceType::Purchase)).empty_message,
            "No PURCHASE invoices found for this month/year."
        );
    }
}

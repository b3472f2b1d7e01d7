//! Monthly report model shared by the dashboard and both exports.

use super::invoice::{InvoiceRecord, InvoiceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Reporting period. Values are carried through as requested, even when the
/// month is outside `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: i32,
    pub year: i32,
}

impl Period {
    pub fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }

    /// English month name, `None` when the month is out of range.
    pub fn month_name(&self) -> Option<&'static str> {
        usize::try_from(self.month)
            .ok()
            .and_then(|m| m.checked_sub(1))
            .and_then(|idx| MONTH_NAMES.get(idx).copied())
    }

    /// Human label such as `January 2026`.
    pub fn label(&self) -> String {
        match self.month_name() {
            Some(name) => format!("{} {}", name, self.year),
            None => format!("Month {} {}", self.month, self.year),
        }
    }

    /// Download file name stem such as `Invoices_January-2026`.
    pub fn file_stem(&self) -> String {
        match self.month_name() {
            Some(name) => format!("Invoices_{}-{}", name, self.year),
            None => format!("Invoices_Month{}-{}", self.month, self.year),
        }
    }

    /// `(number, name)` pairs for the month picker.
    pub fn months() -> impl Iterator<Item = (i32, &'static str)> {
        (1..).zip(MONTH_NAMES)
    }
}

/// Column sums for one partition. Sums start at `0.00` so empty and
/// non-empty partitions carry the same scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub taxable_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
}

impl Default for AggregateTotals {
    fn default() -> Self {
        let zero = Decimal::new(0, 2);
        Self {
            taxable_amount: zero,
            cgst: zero,
            sgst: zero,
            total: zero,
        }
    }
}

impl AggregateTotals {
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn add(&mut self, row: &InvoiceRecord) {
        self.taxable_amount = self.taxable_amount.saturating_add(row.taxable_amount);
        self.cgst = self.cgst.saturating_add(row.cgst);
        self.sgst = self.sgst.saturating_add(row.sgst);
        self.total = self.total.saturating_add(row.total);
    }
}

/// All invoices of one type for the period, in storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub invoice_type: InvoiceType,
    pub rows: Vec<InvoiceRecord>,
    pub totals: AggregateTotals,
}

impl Partition {
    pub fn empty(invoice_type: InvoiceType) -> Self {
        Self {
            invoice_type,
            rows: Vec::new(),
            totals: AggregateTotals::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceReport {
    pub period: Period,
    pub sale: Partition,
    pub purchase: Partition,
}

impl InvoiceReport {
    pub fn partitions(&self) -> [&Partition; 2] {
        [&self.sale, &self.purchase]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_month_names() {
        let period = Period::new(3, 2026);
        assert_eq!(period.month_name(), Some("March"));
        assert_eq!(period.label(), "March 2026");
        assert_eq!(period.file_stem(), "Invoices_March-2026");
    }

    #[test]
    fn out_of_range_months_pass_through() {
        for month in [0, 13, -4] {
            let period = Period::new(month, 2026);
            assert_eq!(period.month_name(), None);
            assert_eq!(period.label(), format!("Month {} 2026", month));
        }
    }

    #[test]
    fn empty_totals_serialize_with_two_places() {
        let json = serde_json::to_value(AggregateTotals::default()).unwrap();
        assert_eq!(json["taxable_amount"], "0.00");
        assert_eq!(json["total"], "0.00");
    }

    #[test]
    fn month_picker_lists_twelve_months() {
        let months: Vec<_> = Period::months().collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], (1, "January"));
        assert_eq!(months[11], (12, "December"));
    }
}

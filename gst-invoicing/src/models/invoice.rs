//! Invoice model for gst-invoicing.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceType {
    #[default]
    Sale,
    Purchase,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Sale => "SALE",
            InvoiceType::Purchase => "PURCHASE",
        }
    }

    /// Anything that is not `PURCHASE` (case-insensitive) is a sale.
    pub fn from_string(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("PURCHASE") {
            InvoiceType::Purchase
        } else {
            InvoiceType::Sale
        }
    }
}

/// How the entered tax rate maps onto the CGST and SGST legs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// The rate applies to each leg: 9 means 9% CGST + 9% SGST.
    #[default]
    RateIsEach,
    /// The rate is the combined rate, halved per leg: 12 means 6% + 6%.
    EqualSplit,
}

impl TaxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxMode::RateIsEach => "rate_is_each",
            TaxMode::EqualSplit => "equal_split",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rate_is_each" => Some(TaxMode::RateIsEach),
            "equal_split" => Some(TaxMode::EqualSplit),
            _ => None,
        }
    }
}

impl std::str::FromStr for TaxMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxMode::from_string(s).ok_or_else(|| format!("Invalid tax mode: {}", s))
    }
}

/// Normalized invoice ready to be persisted.
///
/// Produced by the form intake after tax derivation, so
/// `total == taxable_amount + cgst + sgst` already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInput {
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub invoice_date: NaiveDate,
    pub customer_name: String,
    pub customer_gstin: String,
    pub commodity: String,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_mode: TaxMode,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
}

/// Persisted invoice row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub invoice_date: NaiveDate,
    pub customer_name: String,
    pub customer_gstin: String,
    pub commodity: String,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_mode: TaxMode,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
    pub created_utc: DateTime<Utc>,
}

impl InvoiceRecord {
    /// Attach storage-assigned identity to an input.
    pub fn from_input(id: i64, input: &InvoiceInput, created_utc: DateTime<Utc>) -> Self {
        Self {
            id,
            invoice_number: input.invoice_number.clone(),
            invoice_type: input.invoice_type,
            invoice_date: input.invoice_date,
            customer_name: input.customer_name.clone(),
            customer_gstin: input.customer_gstin.clone(),
            commodity: input.commodity.clone(),
            taxable_amount: input.taxable_amount,
            tax_rate: input.tax_rate,
            tax_mode: input.tax_mode,
            cgst: input.cgst,
            sgst: input.sgst,
            total: input.total,
            created_utc,
        }
    }
}

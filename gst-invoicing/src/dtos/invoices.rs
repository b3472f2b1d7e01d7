use crate::models::{InvoiceInput, InvoiceType, TaxMode};
use crate::services::{derive_tax_fields, round_money, round_rate};
use crate::utils::{parse_decimal, text};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

/// Raw create-invoice submission. Every field may be missing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateInvoiceForm {
    #[validate(length(max = 50, message = "Invoice number must be at most 50 characters"))]
    pub invoice_number: Option<String>,
    pub invoice_type: Option<String>,
    pub invoice_date: Option<String>,
    #[validate(length(max = 255, message = "Customer name must be at most 255 characters"))]
    pub customer_name: Option<String>,
    #[validate(length(max = 15, message = "GSTIN must be at most 15 characters"))]
    pub customer_gstin: Option<String>,
    #[validate(length(max = 255, message = "Commodity must be at most 255 characters"))]
    pub commodity: Option<String>,
    pub taxable_amount: Option<String>,
    pub tax_rate: Option<String>,
    pub tax_mode: Option<String>,
    pub cgst: Option<String>,
    pub sgst: Option<String>,
    /// Display only; the stored total is always recomputed.
    pub total: Option<String>,
}

impl CreateInvoiceForm {
    /// Normalize the submission into a persistable invoice.
    ///
    /// Amounts are coerced leniently, tax legs go through the calculator and
    /// commodity is kept for purchases only.
    pub fn into_input(self, default_mode: TaxMode, now: DateTime<Utc>) -> InvoiceInput {
        let invoice_type = InvoiceType::from_string(self.invoice_type.as_deref().unwrap_or(""));
        let tax_mode = self
            .tax_mode
            .as_deref()
            .and_then(TaxMode::from_string)
            .unwrap_or(default_mode);

        let invoice_number = match text(self.invoice_number.as_deref()) {
            n if n.is_empty() => default_invoice_number(now),
            n => n,
        };

        let invoice_date =
            parse_date(self.invoice_date.as_deref()).unwrap_or_else(|| now.date_naive());

        let commodity = match invoice_type {
            InvoiceType::Purchase => text(self.commodity.as_deref()),
            InvoiceType::Sale => String::new(),
        };

        let taxable_amount =
            round_money(parse_decimal(self.taxable_amount.as_deref()).max(Decimal::ZERO));
        let tax_rate = round_rate(parse_decimal(self.tax_rate.as_deref()).max(Decimal::ZERO));

        let fields = derive_tax_fields(
            taxable_amount,
            tax_rate,
            parse_decimal(self.cgst.as_deref()),
            parse_decimal(self.sgst.as_deref()),
            tax_mode,
        );

        InvoiceInput {
            invoice_number,
            invoice_type,
            invoice_date,
            customer_name: text(self.customer_name.as_deref()),
            customer_gstin: text(self.customer_gstin.as_deref()),
            commodity,
            taxable_amount,
            tax_rate,
            tax_mode,
            cgst: fields.cgst,
            sgst: fields.sgst,
            total: fields.total,
        }
    }
}

/// `INV-YYYYMMDDHHMMSS` in UTC.
pub fn default_invoice_number(now: DateTime<Utc>) -> String {
    now.format("INV-%Y%m%d%H%M%S").to_string()
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(invoice_date = raw, error = %e, "Unparseable invoice date, using today");
            None
        }
    }
}

/// A JSON field that may arrive as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(serde_json::Number),
    Text(String),
}

impl FormValue {
    pub fn as_text(&self) -> String {
        match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }
}

/// Live recalculation request from the invoice form.
#[derive(Debug, Default, Deserialize)]
pub struct TaxDeriveRequest {
    pub taxable_amount: Option<FormValue>,
    pub tax_rate: Option<FormValue>,
    pub cgst: Option<FormValue>,
    pub sgst: Option<FormValue>,
    pub tax_mode: Option<String>,
}

impl TaxDeriveRequest {
    /// `(taxable, rate, cgst, sgst, mode)` after lenient coercion. The rate is
    /// rounded the same way a submitted invoice's rate is.
    pub fn coerce(&self, default_mode: TaxMode) -> (Decimal, Decimal, Decimal, Decimal, TaxMode) {
        let value =
            |v: &Option<FormValue>| parse_decimal(v.as_ref().map(FormValue::as_text).as_deref());
        let mode = self
            .tax_mode
            .as_deref()
            .and_then(TaxMode::from_string)
            .unwrap_or(default_mode);

        (
            value(&self.taxable_amount),
            round_rate(value(&self.tax_rate)),
            value(&self.cgst),
            value(&self.sgst),
            mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn form() -> CreateInvoiceForm {
        CreateInvoiceForm {
            invoice_number: Some("INV-001".to_string()),
            invoice_type: Some("SALE".to_string()),
            invoice_date: Some("2026-03-01".to_string()),
            customer_name: Some(" Acme Traders ".to_string()),
            customer_gstin: Some("27AAPFU0939F1ZV".to_string()),
            taxable_amount: Some("1000".to_string()),
            tax_rate: Some("9".to_string()),
            cgst: Some("0".to_string()),
            sgst: Some("0".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn derives_tax_for_a_sale() {
        let input = form().into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.invoice_number, "INV-001");
        assert_eq!(input.invoice_type, InvoiceType::Sale);
        assert_eq!(input.invoice_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(input.customer_name, "Acme Traders");
        assert_eq!(input.cgst, d("90.00"));
        assert_eq!(input.sgst, d("90.00"));
        assert_eq!(input.total, d("1180.00"));
        assert_eq!(input.tax_mode, TaxMode::RateIsEach);
    }

    #[test]
    fn ignores_client_total() {
        let mut f = form();
        f.total = Some("99999".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.total, input.taxable_amount + input.cgst + input.sgst);
    }

    #[test]
    fn keeps_operator_overrides() {
        let mut f = form();
        f.cgst = Some("85".to_string());
        f.sgst = Some("95".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.cgst, d("85"));
        assert_eq!(input.sgst, d("95"));
        assert_eq!(input.total, d("1180"));
    }

    #[test]
    fn form_tax_mode_beats_default() {
        let mut f = form();
        f.tax_rate = Some("12".to_string());
        f.tax_mode = Some("equal_split".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.tax_mode, TaxMode::EqualSplit);
        assert_eq!(input.cgst, d("60.00"));
        assert_eq!(input.total, d("1120.00"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let input = CreateInvoiceForm::default().into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.invoice_number, "INV-20260314092653");
        assert_eq!(input.invoice_type, InvoiceType::Sale);
        assert_eq!(input.invoice_date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(input.customer_name, "");
        assert_eq!(input.taxable_amount, Decimal::ZERO);
        assert_eq!(input.total, Decimal::ZERO);
    }

    #[test]
    fn garbage_amounts_coerce() {
        let mut f = form();
        f.taxable_amount = Some("1000abc".to_string());
        f.tax_rate = Some("nine".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.taxable_amount, d("1000"));
        assert_eq!(input.tax_rate, Decimal::ZERO);
        assert_eq!(input.total, d("1000"));
    }

    #[test]
    fn commodity_only_kept_for_purchases() {
        let mut sale = form();
        sale.commodity = Some("Steel".to_string());
        assert_eq!(sale.into_input(TaxMode::RateIsEach, now()).commodity, "");

        let mut purchase = form();
        purchase.invoice_type = Some("PURCHASE".to_string());
        purchase.commodity = Some("Steel".to_string());
        let input = purchase.into_input(TaxMode::RateIsEach, now());
        assert_eq!(input.invoice_type, InvoiceType::Purchase);
        assert_eq!(input.commodity, "Steel");
    }

    #[test]
    fn bad_date_falls_back_to_today() {
        let mut f = form();
        f.invoice_date = Some("14/03/2026".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.invoice_date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn rejects_long_gstin() {
        let mut f = form();
        f.customer_gstin = Some("27AAPFU0939F1ZVX".to_string());
        assert!(f.validate().is_err());
        assert!(form().validate().is_ok());
    }

    #[test]
    fn derive_request_accepts_strings_and_numbers() {
        let req: TaxDeriveRequest = serde_json::from_str(
            r#"{"taxable_amount": 1000, "tax_rate": "12", "cgst": "", "tax_mode": "equal_split"}"#,
        )
        .unwrap();

        let (taxable, rate, cgst, sgst, mode) = req.coerce(TaxMode::RateIsEach);

        assert_eq!(taxable, d("1000"));
        assert_eq!(rate, d("12"));
        assert_eq!(cgst, Decimal::ZERO);
        assert_eq!(sgst, Decimal::ZERO);
        assert_eq!(mode, TaxMode::EqualSplit);
    }

    #[test]
    fn oversized_amounts_coerce_to_zero() {
        let mut f = form();
        f.taxable_amount = Some("9000000000000000000000000000".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        assert_eq!(input.taxable_amount, Decimal::ZERO);
        assert_eq!(input.cgst, Decimal::ZERO);
        assert_eq!(input.total, Decimal::ZERO);
    }

    #[test]
    fn rate_is_rounded_before_deriving_tax() {
        let mut f = form();
        f.tax_rate = Some("9.12345".to_string());

        let input = f.into_input(TaxMode::RateIsEach, now());

        // 1000 * 9.1235% = 91.235 -> 91.24; the unrounded rate would give 91.23.
        assert_eq!(input.tax_rate, d("9.1235"));
        assert_eq!(input.cgst, d("91.24"));
        assert_eq!(input.total, d("1182.48"));
    }
}

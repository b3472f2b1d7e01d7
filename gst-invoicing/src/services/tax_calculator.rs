//! CGST/SGST derivation with sticky operator overrides.

use crate::models::TaxMode;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TWO: Decimal = Decimal::TWO;

/// Tax legs and total after a derivation pass, rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxFields {
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
}

/// Round half-up to 2 decimal places. Inputs are never negative, so
/// away-from-zero is half-up. The result always carries a scale of 2.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Round half-up to 4 decimal places, the precision rates are stored at.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-leg tax for `taxable_amount` at `tax_rate` percent.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn auto_leg(taxable_amount: Decimal, tax_rate: Decimal, mode: TaxMode) -> Decimal {
    let per_leg_rate = match mode {
        TaxMode::RateIsEach => tax_rate,
        TaxMode::EqualSplit => tax_rate / TWO,
    };
    taxable_amount.saturating_mul(per_leg_rate) / HUNDRED
}

/// Derive CGST, SGST and total.
///
/// A leg is replaced by the computed value only when it is zero or equal to
/// the other leg as supplied; otherwise the operator's value is kept. Both
/// checks look at the values passed in, not at the result of the other check.
/// Negative inputs are treated as zero. Arithmetic saturates, so oversized
/// inputs never panic.
pub fn derive_tax_fields(
    taxable_amount: Decimal,
    tax_rate: Decimal,
    current_cgst: Decimal,
    current_sgst: Decimal,
    mode: TaxMode,
) -> TaxFields {
    let taxable_amount = taxable_amount.max(Decimal::ZERO);
    let tax_rate = tax_rate.max(Decimal::ZERO);
    let current_cgst = current_cgst.max(Decimal::ZERO);
    let current_sgst = current_sgst.max(Decimal::ZERO);

    let auto = auto_leg(taxable_amount, tax_rate, mode);

    let cgst = if current_cgst.is_zero() || current_cgst == current_sgst {
        auto
    } else {
        current_cgst
    };
    let sgst = if current_sgst.is_zero() || current_sgst == current_cgst {
        auto
    } else {
        current_sgst
    };

    let cgst = round_money(cgst);
    let sgst = round_money(sgst);

    TaxFields {
        cgst,
        sgst,
        total: round_money(taxable_amount.saturating_add(cgst).saturating_add(sgst)),
    }
}

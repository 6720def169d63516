use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_regime::TaxRegime;

/// Tax attributed to one slab of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTax {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    /// Portion of income that falls inside this slab.
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Outcome of a single tax computation. All money values are rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: TaxRegime,
    pub gross_annual_income: Decimal,
    pub slab_breakdown: Vec<SlabTax>,
    pub tax_before_rebate: Decimal,
    /// True when income fell within the rebate limit and there was tax to forgive.
    pub rebate_applied: bool,
    pub tax_after_rebate: Decimal,
    pub cess: Decimal,
    pub total_annual_tax: Decimal,
    pub monthly_withholding: Decimal,
}

impl TaxResult {
    pub fn rebate_amount(&self) -> Decimal {
        self.tax_before_rebate - self.tax_after_rebate
    }
}

//! Progressive income-tax computation under the configured regimes.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Select the slab table and rebate limit for the regime |
//! | 2    | Tax each slab on the part of income inside it: `max(0, min(income, upper) - lower) × rate` |
//! | 3    | Sum the slab taxes (tax before rebate) |
//! | 4    | Rebate: income at or below the rebate limit owes nothing |
//! | 5    | Cess: tax after rebate × cess rate |
//! | 6    | Total annual tax = tax after rebate + cess |
//! | 7    | Monthly withholding = total annual tax / 12 |
//!
//! Every money value produced is rounded half-up to two decimal places; see
//! [`round_half_up`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{RegimeRules, SlabTable, TaxConfig, TaxEngine, TaxRegime, TaxSlab};
//!
//! let old = RegimeRules {
//!     rebate_limit: dec!(500000),
//!     slabs: SlabTable::new(vec![
//!         TaxSlab::bounded(dec!(250000), dec!(0)),
//!         TaxSlab::bounded(dec!(500000), dec!(0.05)),
//!         TaxSlab::bounded(dec!(1000000), dec!(0.20)),
//!         TaxSlab::unbounded(dec!(0.30)),
//!     ])
//!     .unwrap(),
//! };
//! let config = TaxConfig {
//!     cess_rate: dec!(0.04),
//!     standard_deduction: dec!(50000),
//!     new: old.clone(),
//!     old,
//! };
//!
//! let engine = TaxEngine::new(&config);
//! let result = engine.compute_tax(dec!(600000), TaxRegime::Old).unwrap();
//!
//! assert_eq!(result.tax_before_rebate, dec!(32500));
//! assert_eq!(result.cess, dec!(1300));
//! assert_eq!(result.total_annual_tax, dec!(33800));
//! assert_eq!(result.monthly_withholding, dec!(2816.67));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{monthly_share, non_negative, round_half_up};
use crate::calculations::error::{InvalidInputError, ensure_amount};
use crate::models::{SlabTable, SlabTax, TaxConfig, TaxRegime, TaxResult};

/// Calculator for annual income tax and monthly withholding.
///
/// Borrows a validated [`TaxConfig`]; constructing one engine per call is
/// free, and a single engine can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    config: &'a TaxConfig,
}

impl<'a> TaxEngine<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a TaxConfig {
        self.config
    }

    /// Computes tax on `gross_annual_income` under `regime`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when the income is negative or above
    /// [`MAX_AMOUNT`](crate::calculations::MAX_AMOUNT). No other failure is
    /// possible once the configuration has been validated.
    pub fn compute_tax(
        &self,
        gross_annual_income: Decimal,
        regime: TaxRegime,
    ) -> Result<TaxResult, InvalidInputError> {
        let income = ensure_amount("gross_annual_income", gross_annual_income)?;
        let rules = self.config.rules(regime);

        let slab_breakdown = self.slab_breakdown(income, &rules.slabs);
        let tax_before_rebate: Decimal = slab_breakdown.iter().map(|s| s.tax).sum();

        let (tax_after_rebate, rebate_applied) =
            self.apply_rebate(income, tax_before_rebate, rules.rebate_limit);
        let cess = self.cess(tax_after_rebate);
        let total_annual_tax = tax_after_rebate + cess;
        let monthly_withholding = monthly_share(total_annual_tax);

        debug!(
            %regime,
            %income,
            %tax_before_rebate,
            rebate_applied,
            %total_annual_tax,
            %monthly_withholding,
            "computed income tax"
        );

        Ok(TaxResult {
            regime,
            gross_annual_income: income,
            slab_breakdown,
            tax_before_rebate,
            rebate_applied,
            tax_after_rebate,
            cess,
            total_annual_tax,
            monthly_withholding,
        })
    }

    /// Taxes the portion of `income` inside each slab at that slab's rate.
    /// Slabs that income never reaches still appear, with zero amounts.
    fn slab_breakdown(
        &self,
        income: Decimal,
        slabs: &SlabTable,
    ) -> Vec<SlabTax> {
        slabs
            .brackets()
            .map(|(lower, slab)| {
                let ceiling = slab.upper_bound.map_or(income, |upper| income.min(upper));
                let taxable_amount = non_negative(ceiling - lower);
                SlabTax {
                    lower_bound: lower,
                    upper_bound: slab.upper_bound,
                    rate: slab.rate,
                    taxable_amount,
                    tax: round_half_up(taxable_amount * slab.rate),
                }
            })
            .collect()
    }

    /// Forgives the whole tax when income does not exceed the rebate limit.
    fn apply_rebate(
        &self,
        income: Decimal,
        tax: Decimal,
        rebate_limit: Decimal,
    ) -> (Decimal, bool) {
        if income <= rebate_limit {
            (Decimal::ZERO, tax > Decimal::ZERO)
        } else {
            (tax, false)
        }
    }

    fn cess(
        &self,
        tax_after_rebate: Decimal,
    ) -> Decimal {
        round_half_up(tax_after_rebate * self.config.cess_rate)
    }
}

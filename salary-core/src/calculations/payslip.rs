//! Monthly payslip composition.
//!
//! The composer lists each pay component, a gross subtotal and the income-tax
//! deduction taken from a [`TaxResult`]. It does not recompute tax; only
//! [`TaxResult::monthly_withholding`] is read.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{
//!     EmployeeSalaryComponents, LineKind, PayPeriod, TaxRegime, TaxResult, compose_payslip,
//! };
//!
//! let components = EmployeeSalaryComponents::new(dec!(35000), dec!(12000), dec!(3000));
//! let tax = TaxResult {
//!     regime: TaxRegime::Old,
//!     gross_annual_income: dec!(600000),
//!     slab_breakdown: vec![],
//!     tax_before_rebate: dec!(32500),
//!     rebate_applied: false,
//!     tax_after_rebate: dec!(32500),
//!     cess: dec!(1300),
//!     total_annual_tax: dec!(33800),
//!     monthly_withholding: dec!(2816.67),
//! };
//! let period = PayPeriod::new(2026, 10).unwrap();
//!
//! let payslip = compose_payslip(1, components, &tax, period).unwrap();
//!
//! assert_eq!(payslip.net_pay, dec!(47183.33));
//! assert_eq!(payslip.total_deductions(), dec!(2816.67));
//! assert_eq!(payslip.line_items[3].kind, LineKind::Subtotal);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::error::{InvalidInputError, ensure_amount};
use crate::models::{
    EmployeeId, EmployeeSalaryComponents, LineKind, PayPeriod, Payslip, PayslipLine, TaxResult,
};

pub const BASIC_LABEL: &str = "Basic Pay";
pub const HRA_LABEL: &str = "Housing Allowance (HRA)";
pub const OTHER_ALLOWANCES_LABEL: &str = "Other Allowances";
pub const GROSS_LABEL: &str = "Gross Pay";
pub const TDS_LABEL: &str = "Income Tax (TDS)";

/// Builds the payslip for one employee and period.
///
/// Net pay is clamped at zero if withholding ever exceeds gross pay.
///
/// # Errors
///
/// Returns [`InvalidInputError`] if any salary component, or the withholding
/// carried by `tax`, is negative or above
/// [`MAX_AMOUNT`](crate::calculations::MAX_AMOUNT).
pub fn compose_payslip(
    employee_id: EmployeeId,
    components: EmployeeSalaryComponents,
    tax: &TaxResult,
    period: PayPeriod,
) -> Result<Payslip, InvalidInputError> {
    for (field, value) in components.fields() {
        ensure_amount(field, value)?;
    }
    let withholding = ensure_amount("monthly_withholding", tax.monthly_withholding)?;

    let gross_monthly = components.gross_monthly();
    let line_items = vec![
        PayslipLine::new(BASIC_LABEL, components.basic, LineKind::Earning),
        PayslipLine::new(HRA_LABEL, components.housing_allowance, LineKind::Earning),
        PayslipLine::new(
            OTHER_ALLOWANCES_LABEL,
            components.other_allowances,
            LineKind::Earning,
        ),
        PayslipLine::new(GROSS_LABEL, gross_monthly, LineKind::Subtotal),
        PayslipLine::new(TDS_LABEL, withholding, LineKind::Deduction),
    ];

    let net_pay = net_pay(gross_monthly, withholding);
    if net_pay.is_zero() && withholding > gross_monthly {
        warn!(
            employee_id,
            %gross_monthly,
            %withholding,
            "withholding exceeds gross pay; net pay clamped to zero"
        );
    }

    debug!(employee_id, %period, %gross_monthly, %net_pay, "composed payslip");

    Ok(Payslip {
        employee_id,
        period,
        line_items,
        net_pay,
    })
}

fn net_pay(
    gross_monthly: Decimal,
    withholding: Decimal,
) -> Decimal {
    non_negative(gross_monthly - withholding)
}

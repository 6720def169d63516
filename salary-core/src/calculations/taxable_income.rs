//! Annual taxable income from monthly pay and declared deductions.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Gross salary: 12 × (basic + HRA + other allowances) |
//! | 2    | Other annual income |
//! | 3    | Gross total income (Line 1 + Line 2) |
//! | 4    | Deductions: standard + Section 80C + Section 80D |
//! | 5    | Taxable income (Line 3 - Line 4, minimum 0) |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use crate::calculations::error::{InvalidInputError, ensure_amount};
use crate::models::EmployeeSalaryComponents;

/// Everything an employee declares for the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDeclaration {
    pub components: EmployeeSalaryComponents,
    pub other_annual_income: Decimal,
    pub standard_deduction: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncome {
    pub gross_salary: Decimal,
    pub other_income: Decimal,
    pub gross_total_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
}

impl IncomeDeclaration {
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] naming the first field that is negative
    /// or above [`MAX_AMOUNT`](crate::calculations::MAX_AMOUNT).
    pub fn taxable_income(&self) -> Result<TaxableIncome, InvalidInputError> {
        for (field, value) in self.components.fields() {
            ensure_amount(field, value)?;
        }
        let other_income = ensure_amount("other_annual_income", self.other_annual_income)?;
        let standard = ensure_amount("standard_deduction", self.standard_deduction)?;
        let sec_80c = ensure_amount("section_80c", self.section_80c)?;
        let sec_80d = ensure_amount("section_80d", self.section_80d)?;

        let gross_salary = self.components.gross_annual();
        let gross_total_income = gross_salary + other_income;
        let total_deductions = standard + sec_80c + sec_80d;

        Ok(TaxableIncome {
            gross_salary,
            other_income,
            gross_total_income,
            total_deductions,
            taxable_income: non_negative(gross_total_income - total_deductions),
        })
    }
}

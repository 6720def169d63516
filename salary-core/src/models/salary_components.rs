use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly pay components of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeSalaryComponents {
    pub basic: Decimal,
    pub housing_allowance: Decimal,
    pub other_allowances: Decimal,
}

impl EmployeeSalaryComponents {
    pub fn new(
        basic: Decimal,
        housing_allowance: Decimal,
        other_allowances: Decimal,
    ) -> Self {
        Self {
            basic,
            housing_allowance,
            other_allowances,
        }
    }

    pub fn gross_monthly(&self) -> Decimal {
        self.basic + self.housing_allowance + self.other_allowances
    }

    pub fn gross_annual(&self) -> Decimal {
        self.gross_monthly() * Decimal::from(12)
    }

    /// `(field name, value)` pairs, in payslip order.
    pub fn fields(&self) -> [(&'static str, Decimal); 3] {
        [
            ("basic", self.basic),
            ("housing_allowance", self.housing_allowance),
            ("other_allowances", self.other_allowances),
        ]
    }
}

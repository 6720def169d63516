use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;
use super::pay_period::PayPeriod;

/// How a payslip line contributes to net pay. Amounts on every line are
/// non-negative; deductions are marked by their kind rather than their sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Earning,
    Subtotal,
    Deduction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    pub label: String,
    pub amount: Decimal,
    pub kind: LineKind,
}

impl PayslipLine {
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
        kind: LineKind,
    ) -> Self {
        Self {
            label: label.into(),
            amount,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    pub employee_id: EmployeeId,
    pub period: PayPeriod,
    pub line_items: Vec<PayslipLine>,
    pub net_pay: Decimal,
}

impl Payslip {
    pub fn lines_of(
        &self,
        kind: LineKind,
    ) -> impl Iterator<Item = &PayslipLine> + '_ {
        self.line_items.iter().filter(move |line| line.kind == kind)
    }

    pub fn total_deductions(&self) -> Decimal {
        self.lines_of(LineKind::Deduction).map(|l| l.amount).sum()
    }
}

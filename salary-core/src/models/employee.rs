use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::salary_components::EmployeeSalaryComponents;
use super::tax_regime::TaxRegime;
use crate::calculations::{IncomeDeclaration, InvalidInputError, ensure_amount};

pub type EmployeeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,

    // Monthly pay
    pub components: EmployeeSalaryComponents,

    // Annual declarations
    pub other_annual_income: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    /// Overrides the configured standard deduction when set.
    pub standard_deduction: Option<Decimal>,

    pub regime: TaxRegime,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new employees (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub components: EmployeeSalaryComponents,
    pub other_annual_income: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub standard_deduction: Option<Decimal>,
    pub regime: TaxRegime,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmployeeValidationError {
    #[error("employee name is required")]
    EmptyName,

    #[error("enter at least one salary component (basic / HRA / other allowances)")]
    NoSalaryComponents,

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

impl NewEmployee {
    /// Checks the record before it reaches the store: a non-blank name, no
    /// negative amounts, and at least one positive monthly component.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }

        for (field, value) in self.components.fields() {
            ensure_amount(field, value)?;
        }
        ensure_amount("other_annual_income", self.other_annual_income)?;
        ensure_amount("section_80c", self.section_80c)?;
        ensure_amount("section_80d", self.section_80d)?;
        if let Some(deduction) = self.standard_deduction {
            ensure_amount("standard_deduction", deduction)?;
        }

        if self.components.gross_monthly() <= Decimal::ZERO {
            return Err(EmployeeValidationError::NoSalaryComponents);
        }

        Ok(())
    }
}

impl Employee {
    /// The annual income declaration for this employee, falling back to
    /// `default_standard_deduction` when no override is stored.
    pub fn income_declaration(
        &self,
        default_standard_deduction: Decimal,
    ) -> IncomeDeclaration {
        IncomeDeclaration {
            components: self.components,
            other_annual_income: self.other_annual_income,
            standard_deduction: self
                .standard_deduction
                .unwrap_or(default_standard_deduction),
            section_80c: self.section_80c,
            section_80d: self.section_80d,
        }
    }

    pub fn to_new(&self) -> NewEmployee {
        NewEmployee {
            name: self.name.clone(),
            components: self.components,
            other_annual_income: self.other_annual_income,
            section_80c: self.section_80c,
            section_80d: self.section_80d,
            standard_deduction: self.standard_deduction,
            regime: self.regime,
        }
    }
}

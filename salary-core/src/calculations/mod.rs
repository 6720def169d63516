//! Pure salary and income-tax calculations.
//!
//! Nothing in this module performs I/O. Every entry point takes its inputs by
//! value or shared reference and returns a freshly built result, so the
//! calculators can be shared freely between threads.

pub mod common;
pub mod error;
pub mod payslip;
pub mod tax_engine;
pub mod taxable_income;

pub use error::{Constraint, InvalidInputError, MAX_AMOUNT, ensure_amount, ensure_non_negative};
pub use payslip::compose_payslip;
pub use tax_engine::TaxEngine;
pub use taxable_income::{IncomeDeclaration, TaxableIncome};

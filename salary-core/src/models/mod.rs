mod employee;
mod pay_period;
mod payslip;
mod salary_components;
mod tax_config;
mod tax_regime;
mod tax_result;
mod tax_slab;

pub use employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
pub use pay_period::{ParsePeriodError, PayPeriod};
pub use payslip::{LineKind, Payslip, PayslipLine};
pub use salary_components::EmployeeSalaryComponents;
pub use tax_config::{ConfigError, RegimeRules, TaxConfig};
pub use tax_regime::{ParseRegimeError, TaxRegime};
pub use tax_result::{SlabTax, TaxResult};
pub use tax_slab::{SlabTable, TaxSlab};

pub mod calculations;
pub mod db;
pub mod models;

pub use calculations::{InvalidInputError, TaxEngine, compose_payslip};
pub use db::repository::{EmployeeRepository, RepositoryError};
pub use models::*;

pub mod repository;

pub use repository::{EmployeeRepository, RepositoryError};

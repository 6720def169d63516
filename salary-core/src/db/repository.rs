use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Employee, EmployeeId, NewEmployee};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Employee record store, keyed by employee id.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, ordered by id.
    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError>;

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, RepositoryError>;

    /// Stores a new employee under the next free id (one past the highest id).
    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, RepositoryError>;

    /// Replaces the stored record with the same id and refreshes `updated_at`.
    async fn update_employee(&self, employee: &Employee) -> Result<Employee, RepositoryError>;

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), RepositoryError>;
}

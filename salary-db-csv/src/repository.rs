use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use salary_core::{Employee, EmployeeId, EmployeeRepository, NewEmployee, RepositoryError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::record::EmployeeRow;

type EmployeeTable = BTreeMap<EmployeeId, Employee>;

/// Location value that selects a store with no backing file.
pub const IN_MEMORY: &str = ":memory:";

/// Employee store backed by a single CSV file.
///
/// The whole table is held in memory and the file is rewritten after every
/// successful mutation. A store opened with [`CsvRepository::in_memory`]
/// never touches disk.
pub struct CsvRepository {
    path: Option<PathBuf>,
    employees: RwLock<EmployeeTable>,
}

impl CsvRepository {
    /// Loads `path`, or starts with an empty table when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let employees = match tokio::fs::read(&path).await {
            Ok(contents) => parse_table(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "employee file not found; starting empty");
                EmployeeTable::new()
            }
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "cannot read '{}': {e}",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), count = employees.len(), "opened employee store");

        Ok(Self {
            path: Some(path),
            employees: RwLock::new(employees),
        })
    }

    /// Opens the store named by a user-supplied location: a file path, or
    /// [`IN_MEMORY`] for a store that is never written to disk.
    pub async fn open_location(location: &str) -> Result<Self, RepositoryError> {
        match location.trim() {
            "" => Err(RepositoryError::Configuration(
                "employee store needs a file path or ':memory:'".to_string(),
            )),
            IN_MEMORY => Ok(Self::in_memory()),
            path => Self::open(path).await,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            employees: RwLock::new(EmployeeTable::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes `table` to a sibling temp file and renames it over the store.
    async fn persist(
        &self,
        table: &EmployeeTable,
    ) -> Result<(), RepositoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = render_table(table)?;
        let tmp = path.with_extension("csv.tmp");

        tokio::fs::write(&tmp, contents).await.map_err(|e| {
            RepositoryError::Storage(format!("cannot write '{}': {e}", tmp.display()))
        })?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "cannot remove temp file");
            }
            return Err(RepositoryError::Storage(format!(
                "cannot replace '{}': {e}",
                path.display()
            )));
        }
        Ok(())
    }
}

fn parse_table(contents: &[u8]) -> Result<EmployeeTable, RepositoryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents);
    let mut table = EmployeeTable::new();

    for result in reader.deserialize::<EmployeeRow>() {
        let row = result.map_err(|e| RepositoryError::Storage(e.to_string()))?;
        let employee = Employee::try_from(row)?;
        let id = employee.id;
        if table.insert(id, employee).is_some() {
            return Err(RepositoryError::Storage(format!(
                "duplicate employee id {id}"
            )));
        }
    }

    Ok(table)
}

fn render_table(table: &EmployeeTable) -> Result<Vec<u8>, RepositoryError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for employee in table.values() {
        writer
            .serialize(EmployeeRow::from(employee))
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

#[async_trait]
impl EmployeeRepository for CsvRepository {
    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.employees.read().await.values().cloned().collect())
    }

    async fn get_employee(
        &self,
        id: EmployeeId,
    ) -> Result<Employee, RepositoryError> {
        self.employees
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create_employee(
        &self,
        employee: NewEmployee,
    ) -> Result<Employee, RepositoryError> {
        let mut guard = self.employees.write().await;
        let id = guard.keys().next_back().map_or(1, |max| max + 1);
        let now = Utc::now();
        let created = Employee {
            id,
            name: employee.name,
            components: employee.components,
            other_annual_income: employee.other_annual_income,
            section_80c: employee.section_80c,
            section_80d: employee.section_80d,
            standard_deduction: employee.standard_deduction,
            regime: employee.regime,
            created_at: now,
            updated_at: now,
        };

        let mut next = guard.clone();
        next.insert(id, created.clone());
        self.persist(&next).await?;
        *guard = next;

        info!(id, name = %created.name, "added employee");
        Ok(created)
    }

    async fn update_employee(
        &self,
        employee: &Employee,
    ) -> Result<Employee, RepositoryError> {
        let mut guard = self.employees.write().await;
        let existing = guard.get(&employee.id).ok_or(RepositoryError::NotFound)?;
        let updated = Employee {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..employee.clone()
        };

        let mut next = guard.clone();
        next.insert(updated.id, updated.clone());
        self.persist(&next).await?;
        *guard = next;

        info!(id = updated.id, "updated employee");
        Ok(updated)
    }

    async fn delete_employee(
        &self,
        id: EmployeeId,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.employees.write().await;
        if !guard.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }

        let mut next = guard.clone();
        next.remove(&id);
        self.persist(&next).await?;
        *guard = next;

        info!(id, "deleted employee");
        Ok(())
    }
}

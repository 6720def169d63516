//! CSV-file backend for the employee record store.

mod decimal;
mod record;
mod repository;

pub use repository::{CsvRepository, IN_MEMORY};

//! Flat CSV row layout for [`Employee`].
//!
//! | Column                | Type     | Notes                                   |
//! |-----------------------|----------|-----------------------------------------|
//! | `id`                  | integer  | unique                                  |
//! | `name`                | string   |                                         |
//! | `basic`               | decimal  | monthly                                 |
//! | `housing_allowance`   | decimal  | monthly                                 |
//! | `other_allowances`    | decimal  | monthly                                 |
//! | `other_annual_income` | decimal  | annual                                  |
//! | `section_80c`         | decimal  | annual                                  |
//! | `section_80d`         | decimal  | annual                                  |
//! | `standard_deduction`  | decimal  | empty = configured default              |
//! | `regime`              | string   | `old` or `new`                          |
//! | `created_at`          | RFC 3339 |                                         |
//! | `updated_at`          | RFC 3339 |                                         |

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salary_core::{Employee, EmployeeId, EmployeeSalaryComponents, RepositoryError, TaxRegime};
use serde::{Deserialize, Serialize};

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EmployeeRow {
    id: EmployeeId,
    name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    basic: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    housing_allowance: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    other_allowances: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    other_annual_income: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    section_80c: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    section_80d: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    standard_deduction: Option<Decimal>,
    regime: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let regime = TaxRegime::parse(&row.regime).ok_or_else(|| {
            RepositoryError::Storage(format!(
                "invalid regime '{}' for employee {}",
                row.regime, row.id
            ))
        })?;
        Ok(Employee {
            id: row.id,
            name: row.name,
            components: EmployeeSalaryComponents::new(
                row.basic,
                row.housing_allowance,
                row.other_allowances,
            ),
            other_annual_income: row.other_annual_income,
            section_80c: row.section_80c,
            section_80d: row.section_80d,
            standard_deduction: row.standard_deduction,
            regime,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        EmployeeRow {
            id: employee.id,
            name: employee.name.clone(),
            basic: employee.components.basic,
            housing_allowance: employee.components.housing_allowance,
            other_allowances: employee.components.other_allowances,
            other_annual_income: employee.other_annual_income,
            section_80c: employee.section_80c,
            section_80d: employee.section_80d,
            standard_deduction: employee.standard_deduction,
            regime: employee.regime.as_str().to_string(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

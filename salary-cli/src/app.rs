use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use salary_core::{
    Employee, EmployeeId, EmployeeRepository, EmployeeSalaryComponents, NewEmployee, PayPeriod,
    Payslip, TaxConfig, TaxEngine, TaxRegime, compose_payslip,
};
use salary_data::{default_tax_config, load_tax_config};
use tracing::debug;

use crate::cli::{AddArgs, Command, DeclarationArgs, UpdateArgs};
use crate::render::{self, EmployeeIncome, TaxReport};

/// Loads the tax configuration at `path`, or the bundled one when `None`.
pub fn load_config(path: Option<&Path>) -> Result<TaxConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading tax configuration");
            load_tax_config(path)
                .with_context(|| format!("cannot load tax configuration '{}'", path.display()))
        }
        None => default_tax_config().context("bundled tax configuration is invalid"),
    }
}

pub fn new_employee(args: AddArgs) -> NewEmployee {
    let DeclarationArgs {
        other_income,
        section_80c,
        section_80d,
        standard_deduction,
        regime,
    } = args.declarations;

    NewEmployee {
        name: args.name.trim().to_string(),
        components: EmployeeSalaryComponents::new(
            args.basic,
            args.housing_allowance,
            args.other_allowances,
        ),
        other_annual_income: other_income.unwrap_or_default(),
        section_80c: section_80c.unwrap_or_default(),
        section_80d: section_80d.unwrap_or_default(),
        standard_deduction,
        regime: regime.unwrap_or_default(),
    }
}

/// Returns `employee` with every field given in `args` replaced.
pub fn apply_update(
    employee: &Employee,
    args: &UpdateArgs,
) -> Employee {
    let mut updated = employee.clone();
    let declarations = &args.declarations;

    if let Some(name) = &args.name {
        updated.name = name.trim().to_string();
    }
    if let Some(basic) = args.basic {
        updated.components.basic = basic;
    }
    if let Some(hra) = args.housing_allowance {
        updated.components.housing_allowance = hra;
    }
    if let Some(other) = args.other_allowances {
        updated.components.other_allowances = other;
    }
    if let Some(income) = declarations.other_income {
        updated.other_annual_income = income;
    }
    if let Some(amount) = declarations.section_80c {
        updated.section_80c = amount;
    }
    if let Some(amount) = declarations.section_80d {
        updated.section_80d = amount;
    }
    if args.default_standard_deduction {
        updated.standard_deduction = None;
    } else if declarations.standard_deduction.is_some() {
        updated.standard_deduction = declarations.standard_deduction;
    }
    if let Some(regime) = declarations.regime {
        updated.regime = regime;
    }

    updated
}

async fn fetch_employee(
    repo: &dyn EmployeeRepository,
    id: EmployeeId,
) -> Result<Employee> {
    repo.get_employee(id)
        .await
        .with_context(|| format!("cannot load employee {id}"))
}

/// Tax estimate for a stored employee, on their taxable income.
pub async fn employee_tax(
    repo: &dyn EmployeeRepository,
    config: &TaxConfig,
    id: EmployeeId,
    regime: Option<TaxRegime>,
) -> Result<TaxReport> {
    let employee = fetch_employee(repo, id).await?;
    let taxable = employee
        .income_declaration(config.standard_deduction)
        .taxable_income()
        .with_context(|| format!("employee {id} has invalid amounts"))?;
    let regime = regime.unwrap_or(employee.regime);

    let result = TaxEngine::new(config).compute_tax(taxable.taxable_income, regime)?;

    Ok(TaxReport {
        employee: Some(EmployeeIncome { employee, taxable }),
        cess_rate: config.cess_rate,
        result,
    })
}

/// Tax estimate for a bare taxable income.
pub fn income_tax(
    config: &TaxConfig,
    income: Decimal,
    regime: TaxRegime,
) -> Result<TaxReport> {
    let result = TaxEngine::new(config).compute_tax(income, regime)?;
    Ok(TaxReport {
        employee: None,
        cess_rate: config.cess_rate,
        result,
    })
}

/// Payslip for `period`, withholding the monthly share of the employee's
/// estimated annual tax under their own regime.
pub async fn employee_payslip(
    repo: &dyn EmployeeRepository,
    config: &TaxConfig,
    id: EmployeeId,
    period: PayPeriod,
) -> Result<(Employee, Payslip)> {
    let report = employee_tax(repo, config, id, None).await?;
    let Some(EmployeeIncome { employee, .. }) = report.employee else {
        anyhow::bail!("employee {id} missing from tax report");
    };

    let payslip = compose_payslip(employee.id, employee.components, &report.result, period)?;
    Ok((employee, payslip))
}

/// Executes `command` and returns the text to print.
pub async fn run(
    command: Command,
    repo: &dyn EmployeeRepository,
    config: &TaxConfig,
) -> Result<String> {
    match command {
        Command::List => {
            let employees = repo.list_employees().await?;
            Ok(render::employee_table(&employees))
        }
        Command::Add(args) => {
            let employee = new_employee(args);
            employee.validate()?;
            let created = repo
                .create_employee(employee)
                .await
                .context("cannot save employee")?;
            Ok(format!("Added employee #{}: {}", created.id, created.name))
        }
        Command::Update(args) => {
            let current = fetch_employee(repo, args.id).await?;
            let updated = apply_update(&current, &args);
            updated.to_new().validate()?;
            let saved = repo
                .update_employee(&updated)
                .await
                .with_context(|| format!("cannot save employee {}", args.id))?;
            Ok(format!("Updated employee #{}: {}", saved.id, saved.name))
        }
        Command::Delete { id } => {
            repo.delete_employee(id)
                .await
                .with_context(|| format!("cannot delete employee {id}"))?;
            Ok(format!("Deleted employee #{id}"))
        }
        Command::Tax(args) => {
            let report = match (args.id, args.income) {
                (Some(id), _) => employee_tax(repo, config, id, args.regime).await?,
                (None, Some(income)) => income_tax(config, income, args.regime.unwrap_or_default())?,
                (None, None) => anyhow::bail!("give an employee id or --income"),
            };
            Ok(render::tax_report(&report))
        }
        Command::Payslip(args) => {
            let period = args.period.unwrap_or_else(PayPeriod::current);
            let (employee, payslip) = employee_payslip(repo, config, args.id, period).await?;
            Ok(render::payslip(&employee, &payslip))
        }
    }
}

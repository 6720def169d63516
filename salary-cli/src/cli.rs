use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use salary_core::{EmployeeId, PayPeriod, TaxRegime};

use crate::utils::parse_decimal;

/// Salary records, income-tax estimates and payslips.
///
/// Employee records live in a CSV file. Tax is estimated under the old or new
/// slab regime using the bundled tax configuration unless `--config` points at
/// another one.
#[derive(Debug, Parser)]
#[command(name = "salary", version)]
pub struct Cli {
    /// Employee record file, or `:memory:` for a throwaway store.
    #[arg(long, global = true, default_value = "employees.csv")]
    pub data: PathBuf,

    /// Tax configuration (TOML). Defaults to the bundled configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all employees.
    List,
    /// Add an employee.
    Add(AddArgs),
    /// Change fields of an existing employee.
    Update(UpdateArgs),
    /// Remove an employee.
    Delete {
        id: EmployeeId,
    },
    /// Estimate annual income tax for an employee or a given income.
    Tax(TaxArgs),
    /// Print a monthly payslip.
    Payslip(PayslipArgs),
}

/// Annual declarations shared by `add` and `update`.
#[derive(Debug, Clone, Default, Args)]
pub struct DeclarationArgs {
    /// Other annual income (interest, rent, ...).
    #[arg(long, value_parser = parse_decimal)]
    pub other_income: Option<Decimal>,

    /// Annual Section 80C deduction.
    #[arg(long = "sec80c", value_parser = parse_decimal)]
    pub section_80c: Option<Decimal>,

    /// Annual Section 80D deduction.
    #[arg(long = "sec80d", value_parser = parse_decimal)]
    pub section_80d: Option<Decimal>,

    /// Standard deduction override for this employee.
    #[arg(long, value_parser = parse_decimal)]
    pub standard_deduction: Option<Decimal>,

    /// Tax regime: `old` or `new`.
    #[arg(long)]
    pub regime: Option<TaxRegime>,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    /// Monthly basic pay.
    #[arg(long, value_parser = parse_decimal)]
    pub basic: Decimal,

    /// Monthly housing allowance.
    #[arg(long = "hra", value_parser = parse_decimal)]
    pub housing_allowance: Decimal,

    /// Monthly other allowances.
    #[arg(long, value_parser = parse_decimal)]
    pub other_allowances: Decimal,

    #[command(flatten)]
    pub declarations: DeclarationArgs,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    pub id: EmployeeId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_parser = parse_decimal)]
    pub basic: Option<Decimal>,

    #[arg(long = "hra", value_parser = parse_decimal)]
    pub housing_allowance: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub other_allowances: Option<Decimal>,

    /// Drop the standard deduction override and use the configured default.
    #[arg(long, conflicts_with = "standard_deduction")]
    pub default_standard_deduction: bool,

    #[command(flatten)]
    pub declarations: DeclarationArgs,
}

#[derive(Debug, Clone, Args)]
pub struct TaxArgs {
    /// Employee to estimate for.
    #[arg(required_unless_present = "income", conflicts_with = "income")]
    pub id: Option<EmployeeId>,

    /// Taxable annual income to estimate for, instead of an employee.
    #[arg(long, value_parser = parse_decimal)]
    pub income: Option<Decimal>,

    /// Regime to use. Defaults to the employee's regime, or `new` with `--income`.
    #[arg(long)]
    pub regime: Option<TaxRegime>,
}

#[derive(Debug, Clone, Args)]
pub struct PayslipArgs {
    pub id: EmployeeId,

    /// Month to print, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    pub period: Option<PayPeriod>,
}

//! Plain-text views of employees, tax estimates and payslips.

use rust_decimal::Decimal;
use salary_core::calculations::TaxableIncome;
use salary_core::{Employee, LineKind, Payslip, SlabTax, TaxResult};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::utils::{format_amount, format_rate};

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 16;

/// Everything shown by the `tax` command.
#[derive(Debug, Clone)]
pub struct TaxReport {
    pub employee: Option<EmployeeIncome>,
    pub cess_rate: Decimal,
    pub result: TaxResult,
}

/// The employee a tax estimate was made for and how their taxable income was derived.
#[derive(Debug, Clone)]
pub struct EmployeeIncome {
    pub employee: Employee,
    pub taxable: TaxableIncome,
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Regime")]
    regime: String,
    #[tabled(rename = "Monthly Gross")]
    monthly_gross: String,
    #[tabled(rename = "Annual Gross")]
    annual_gross: String,
}

#[derive(Tabled)]
struct SlabRow {
    #[tabled(rename = "Slab")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

fn amount_line(
    label: &str,
    amount: Decimal,
) -> String {
    format!("{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}\n", format_amount(amount))
}

fn slab_range(slab: &SlabTax) -> String {
    match slab.upper_bound {
        Some(upper) => format!(
            "{} - {}",
            format_amount(slab.lower_bound),
            format_amount(upper)
        ),
        None => format!("above {}", format_amount(slab.lower_bound)),
    }
}

pub fn employee_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees on file.".to_string();
    }

    let rows: Vec<EmployeeRow> = employees
        .iter()
        .map(|e| EmployeeRow {
            id: e.id,
            name: e.name.clone(),
            regime: e.regime.as_str().to_string(),
            monthly_gross: format_amount(e.components.gross_monthly()),
            annual_gross: format_amount(e.components.gross_annual()),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

fn slab_table(result: &TaxResult) -> String {
    let rows: Vec<SlabRow> = result
        .slab_breakdown
        .iter()
        .map(|slab| SlabRow {
            range: slab_range(slab),
            rate: format_rate(slab.rate),
            taxable: format_amount(slab.taxable_amount),
            tax: format_amount(slab.tax),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

pub fn tax_report(report: &TaxReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    if let Some(income) = &report.employee {
        let employee = &income.employee;
        let taxable = &income.taxable;
        out.push_str(&format!("Employee #{}: {}\n\n", employee.id, employee.name));
        out.push_str(&amount_line("Gross salary", taxable.gross_salary));
        out.push_str(&amount_line("Other income", taxable.other_income));
        out.push_str(&amount_line("Gross total income", taxable.gross_total_income));
        out.push_str(&amount_line("Less: deductions", taxable.total_deductions));
        out.push_str(&amount_line("Taxable income", taxable.taxable_income));
    } else {
        out.push_str(&amount_line("Taxable income", result.gross_annual_income));
    }

    out.push('\n');
    out.push_str(&format!("{}\n{}\n", result.regime.label(), slab_table(result)));

    out.push_str(&amount_line("Tax before rebate", result.tax_before_rebate));
    if result.rebate_applied {
        out.push_str(&amount_line("Rebate", result.rebate_amount()));
    }
    out.push_str(&amount_line("Tax after rebate", result.tax_after_rebate));
    let cess_label = format!("Cess ({})", format_rate(report.cess_rate));
    out.push_str(&amount_line(&cess_label, result.cess));
    out.push_str(&amount_line("Total annual tax", result.total_annual_tax));
    out.push_str(&amount_line("Monthly withholding", result.monthly_withholding));

    out.trim_end().to_string()
}

pub fn payslip(
    employee: &Employee,
    payslip: &Payslip,
) -> String {
    let mut out = String::new();
    let rule = "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH);

    out.push_str(&format!(
        "Payslip for {}\nEmployee #{}: {}\nRegime: {}\n{rule}\n",
        payslip.period,
        employee.id,
        employee.name,
        employee.regime.label()
    ));

    for line in payslip.lines_of(LineKind::Earning) {
        out.push_str(&amount_line(&line.label, line.amount));
    }
    for line in payslip.lines_of(LineKind::Subtotal) {
        out.push_str(&amount_line(&line.label, line.amount));
    }
    out.push('\n');
    for line in payslip.lines_of(LineKind::Deduction) {
        out.push_str(&amount_line(&line.label, line.amount));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&amount_line("Net Pay", payslip.net_pay));

    out.trim_end().to_string()
}

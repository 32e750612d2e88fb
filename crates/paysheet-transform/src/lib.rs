#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/paysheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod columns;
pub mod error;
pub mod hours;
pub mod payroll;

pub use error::{Result, TransformError};
pub use hours::{event_hours, monthly_employee_hours};
pub use payroll::{branch_salary, branch_totals, non_finite_rates, rates_from_totals};

use paysheet_data::{TableSet, tables};
use tracing::{info, warn};

/// Derive the monthly hours and branch payroll tables.
///
/// Reads `timesheets_raw` and `employees_raw` from `input` and returns a new
/// set holding everything from `input` plus `timesheets` (hours per employee
/// per month) and `branch_salary` (salary per hour per branch per month).
pub fn transform(input: TableSet) -> Result<TableSet> {
    info!("[TRANSFORMATION] Computing total working hours for each employee.");
    let hours = monthly_employee_hours(input.get(tables::TIMESHEETS_RAW)?)?;

    info!("[TRANSFORMATION] Computing total salary and working hours for each branch.");
    let totals = branch_totals(input.get(tables::EMPLOYEES_RAW)?, &hours)?;

    info!("[TRANSFORMATION] Computing hourly salary of each branch.");
    let salary = rates_from_totals(totals)?;

    let non_finite = non_finite_rates(&salary)?;
    if non_finite > 0 {
        warn!(
            rows = non_finite,
            "branch periods with zero working hours have a non-finite salary_per_hour"
        );
    }

    info!("[TRANSFORMATION] DONE.");
    Ok(input
        .with_table(tables::TIMESHEETS, hours)
        .with_table(tables::BRANCH_SALARY, salary))
}

//! Salary per working hour per branch per month.

use crate::columns::{first_present, require_columns};
use crate::error::Result;
use paysheet_data::tables;
use polars::prelude::*;

/// Accepted spellings of the employee key in the employee table.
///
/// Older employee exports spell it `employe_id`.
pub const EMPLOYEE_ID_ALIASES: &[&str] = &["employee_id", "employe_id"];

/// Summed salary and hours per (year, month, branch).
///
/// Every employee is paired with every period (distinct year/month) in which
/// some known employee has hours, and then left-joined to the hours on
/// (employee_id, year, month). An employee without hours in a period keeps
/// its salary in that period with null hours, and null hours sum as zero.
/// Hours of ids missing from `employees` neither count nor open a period.
/// Employment dates are not used.
///
/// Returns columns `[year, month, branch_id, salary, total_hours]`.
pub fn branch_totals(employees: &DataFrame, monthly_hours: &DataFrame) -> Result<DataFrame> {
    let key = first_present(tables::EMPLOYEES_RAW, employees, EMPLOYEE_ID_ALIASES)?;
    require_columns(tables::EMPLOYEES_RAW, employees, &["branch_id", "salary"])?;
    require_columns(
        tables::TIMESHEETS,
        monthly_hours,
        &["year", "month", "employee_id", "total_hours"],
    )?;

    let staff = employees.clone().lazy().select([
        col(key).cast(DataType::Int64).alias("employee_id"),
        col("branch_id").cast(DataType::Int64),
        col("salary").cast(DataType::Float64),
    ]);

    let hours = monthly_hours.clone().lazy().select([
        col("year").cast(DataType::Int32),
        col("month").cast(DataType::Int32),
        col("employee_id").cast(DataType::Int64),
        col("total_hours").cast(DataType::Float64),
    ]);

    let staff_ids = staff.clone().select([col("employee_id")]);
    let periods = hours
        .clone()
        .join(
            staff_ids,
            [col("employee_id")],
            [col("employee_id")],
            JoinArgs::new(JoinType::Inner),
        )
        .filter(col("year").is_not_null().and(col("month").is_not_null()))
        .group_by([col("year"), col("month")])
        .agg([col("total_hours").sum()])
        .select([col("year"), col("month")]);

    let keys = [col("employee_id"), col("year"), col("month")];

    let totals = staff
        .cross_join(periods, None)
        .join(hours, keys.clone(), keys, JoinArgs::new(JoinType::Left))
        .group_by([col("year"), col("month"), col("branch_id")])
        .agg([col("salary").sum(), col("total_hours").sum()])
        .sort(["year", "month", "branch_id"], SortMultipleOptions::default())
        .collect()?;

    Ok(totals)
}

/// Salary per hour per (year, month, branch).
///
/// The rate is summed salary divided by summed hours, not a mean of
/// per-employee rates. Zero hours give `inf` (or `NaN` when the summed salary
/// is zero too); the value is kept as is.
///
/// Returns columns `[year, month, branch_id, salary_per_hour]`.
pub fn branch_salary(employees: &DataFrame, monthly_hours: &DataFrame) -> Result<DataFrame> {
    rates_from_totals(branch_totals(employees, monthly_hours)?)
}

/// Turn the output of [`branch_totals`] into salary per hour, dropping the
/// summed salary and hours.
pub fn rates_from_totals(totals: DataFrame) -> Result<DataFrame> {
    let rates = totals
        .lazy()
        .with_column((col("salary") / col("total_hours")).alias("salary_per_hour"))
        .select([
            col("year"),
            col("month"),
            col("branch_id"),
            col("salary_per_hour"),
        ])
        .collect()?;

    Ok(rates)
}

/// Number of rows whose `salary_per_hour` is `inf` or `NaN`.
pub fn non_finite_rates(branch_salary: &DataFrame) -> Result<usize> {
    let count = branch_salary
        .column("salary_per_hour")?
        .f64()?
        .into_iter()
        .flatten()
        .filter(|rate| !rate.is_finite())
        .count();

    Ok(count)
}

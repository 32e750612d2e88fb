//! Plain-text rendering of the branch payroll table.

use polars::prelude::*;
use std::fmt::Write;

/// Render `[year, month, branch_id, salary_per_hour]` rows as a table.
pub(crate) fn format_branch_salary(df: &DataFrame) -> PolarsResult<String> {
    let years = df.column("year")?.cast(&DataType::Int64)?;
    let months = df.column("month")?.cast(&DataType::Int64)?;
    let branches = df.column("branch_id")?.cast(&DataType::Int64)?;
    let rates = df.column("salary_per_hour")?.cast(&DataType::Float64)?;
    let (years, months, branches, rates) = (years.i64()?, months.i64()?, branches.i64()?, rates.f64()?);

    let mut out = String::new();
    let _ = writeln!(out, "{:<8}{:>10}{:>18}", "Period", "Branch", "Salary/hour");
    let _ = writeln!(out, "{}", "─".repeat(36));

    for i in 0..df.height() {
        let period = match (years.get(i), months.get(i)) {
            (Some(y), Some(m)) => format!("{y}-{m:02}"),
            _ => "-".to_string(),
        };
        let branch = branches.get(i).map_or_else(|| "-".to_string(), |b| b.to_string());
        let rate = rates.get(i).map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
        let _ = writeln!(out, "{period:<8}{branch:>10}{rate:>18}");
    }

    let _ = write!(out, "{} row(s)", df.height());
    Ok(out)
}

/// Print the branch payroll table to stdout.
pub(crate) fn print_branch_salary(df: &DataFrame) -> PolarsResult<()> {
    println!("{}", format_branch_salary(df)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_branch_salary() {
        let df = DataFrame::new(vec![
            Series::new("year".into(), [2024i32, 2024]).into(),
            Series::new("month".into(), [3i32, 3]).into(),
            Series::new("branch_id".into(), [10i64, 20]).into(),
            Series::new("salary_per_hour".into(), [18.75f64, f64::INFINITY]).into(),
        ])
        .unwrap();

        let text = format_branch_salary(&df).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("2024-03"));
        assert!(lines[2].ends_with("18.75"));
        assert!(lines[3].ends_with("inf"));
        assert_eq!(lines[4], "2 row(s)");
    }
}

//! Working hours per employee per month.
//!
//! Each complete timesheet event becomes a pair of timestamps built from the
//! event date and its check-in/check-out times. Elapsed hours are summed per
//! (year, month, employee).

use crate::columns::{require_columns, require_dtype};
use crate::error::{Result, TransformError};
use paysheet_data::tables;
use polars::prelude::*;

/// Nanoseconds in one calendar day.
pub const NANOS_PER_DAY: i64 = 86_400_000_000_000;

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// Accepted time-of-day layouts, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Elapsed hours of every complete timesheet event.
///
/// Rows missing the date, the check-in or the check-out are dropped. The
/// result has columns
/// `[year, month, employee_id, checkin_at, checkout_at, total_hours]` where
/// the `_at` columns are nanosecond timestamps. A checkout earlier than the
/// checkin on the same date gives negative hours.
pub fn event_hours(timesheets: &DataFrame) -> Result<DataFrame> {
    let table = tables::TIMESHEETS_RAW;
    require_columns(table, timesheets, &["employee_id", "date", "checkin", "checkout"])?;
    require_dtype(table, timesheets, "date", &DataType::Date)?;
    require_dtype(table, timesheets, "checkin", &DataType::String)?;
    require_dtype(table, timesheets, "checkout", &DataType::String)?;

    let events = timesheets
        .clone()
        .lazy()
        .filter(
            col("date")
                .is_not_null()
                .and(col("checkin").is_not_null())
                .and(col("checkout").is_not_null()),
        )
        .select([
            col("employee_id").cast(DataType::Int64),
            col("date"),
            col("checkin"),
            col("checkout"),
            time_of_day("checkin").alias("checkin_time"),
            time_of_day("checkout").alias("checkout_time"),
        ])
        .collect()?;

    reject_unparsed(&events, "checkin")?;
    reject_unparsed(&events, "checkout")?;

    let day_start = col("date").cast(DataType::Int32).cast(DataType::Int64) * lit(NANOS_PER_DAY);
    let timestamp = DataType::Datetime(TimeUnit::Nanoseconds, None);

    let events = events
        .lazy()
        .with_columns([
            (day_start.clone() + col("checkin_time").cast(DataType::Int64)).alias("checkin_ns"),
            (day_start + col("checkout_time").cast(DataType::Int64)).alias("checkout_ns"),
            col("date").dt().year().cast(DataType::Int32).alias("year"),
            col("date").dt().month().cast(DataType::Int32).alias("month"),
        ])
        .with_column(
            ((col("checkout_ns") - col("checkin_ns")).cast(DataType::Float64)
                / lit(NANOS_PER_HOUR))
            .alias("total_hours"),
        )
        .select([
            col("year"),
            col("month"),
            col("employee_id"),
            col("checkin_ns").cast(timestamp.clone()).alias("checkin_at"),
            col("checkout_ns").cast(timestamp).alias("checkout_at"),
            col("total_hours"),
        ])
        .collect()?;

    Ok(events)
}

/// Total hours per (year, month, employee).
///
/// Returns columns `[year, month, employee_id, total_hours]` sorted by key.
pub fn monthly_employee_hours(timesheets: &DataFrame) -> Result<DataFrame> {
    let monthly = event_hours(timesheets)?
        .lazy()
        .group_by([col("year"), col("month"), col("employee_id")])
        .agg([col("total_hours").sum()])
        .sort(["year", "month", "employee_id"], SortMultipleOptions::default())
        .collect()?;

    Ok(monthly)
}

/// Time-of-day column parsed with the first layout that fits each cell.
fn time_of_day(column: &str) -> Expr {
    TIME_FORMATS
        .iter()
        .rev()
        .fold(lit(NULL).cast(DataType::Time), |fallback, fmt| {
            let parsed = col(column).str().to_time(StrptimeOptions {
                format: Some((*fmt).into()),
                strict: false,
                ..Default::default()
            });
            when(parsed.clone().is_not_null())
                .then(parsed)
                .otherwise(fallback)
        })
}

/// Fail on the first cell of `column` that no time layout accepted.
fn reject_unparsed(events: &DataFrame, column: &str) -> Result<()> {
    let parsed = format!("{column}_time");
    let unparsed = events
        .clone()
        .lazy()
        .filter(col(parsed.as_str()).is_null())
        .select([col(column)])
        .limit(1)
        .collect()?;

    match unparsed.column(column)?.str()?.get(0) {
        Some(value) => Err(TransformError::InvalidTime {
            column: column.to_string(),
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use paysheet_data::extract::read_csv;
    use rstest::rstest;

    fn timesheets(csv: &str) -> DataFrame {
        read_csv(tables::TIMESHEETS_RAW, csv.as_bytes(), &["date".to_string()]).unwrap()
    }

    fn hours_of(df: &DataFrame) -> Vec<f64> {
        df.column("total_hours")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    fn single_event(checkin: &str, checkout: &str) -> DataFrame {
        timesheets(&format!(
            "timesheet_id,employee_id,date,checkin,checkout\n1,1,2024-03-01,{checkin},{checkout}\n"
        ))
    }

    #[rstest]
    #[case("09:00:00", "17:30", 8.5)]
    #[case("00:00:00", "00:00:01", 1.0 / 3600.0)]
    #[case("09:00:00.500", "09:30:00", (1800.0 - 0.5) / 3600.0)]
    #[case("08:00", "23:59:59.250", (57_599.25) / 3600.0)]
    fn test_time_layouts(#[case] checkin: &str, #[case] checkout: &str, #[case] hours: f64) {
        let events = event_hours(&single_event(checkin, checkout)).unwrap();
        assert_relative_eq!(hours_of(&events)[0], hours, epsilon = 1e-12);
    }

    #[rstest]
    #[case("9am")]
    #[case("25:00:00")]
    fn test_unparseable_checkin_is_rejected(#[case] raw: &str) {
        let err = event_hours(&single_event(raw, "17:00:00")).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidTime { ref column, ref value } if column == "checkin" && value == raw
        ));
    }

    #[test]
    fn test_incomplete_events_contribute_nothing() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,2024-03-01,09:00:00,17:00:00
2,1,2024-03-02,09:00:00,
3,1,2024-03-03,,17:00:00
4,2,2024-03-03,nan,NaN
",
        );

        let events = event_hours(&df).unwrap();
        assert_eq!(events.height(), 1);

        let monthly = monthly_employee_hours(&df).unwrap();
        assert_eq!(monthly.height(), 1);
        assert_eq!(monthly.column("employee_id").unwrap().i64().unwrap().get(0), Some(1));
        assert_relative_eq!(hours_of(&monthly)[0], 8.0);
    }

    #[test]
    fn test_events_without_date_are_dropped() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,2024-03-01,09:00:00,17:00:00
2,1,,09:00:00,17:00:00
",
        );

        let monthly = monthly_employee_hours(&df).unwrap();
        assert_eq!(monthly.height(), 1);
        assert_eq!(monthly.column("year").unwrap().null_count(), 0);
        assert_eq!(monthly.column("month").unwrap().i32().unwrap().get(0), Some(3));
        assert_relative_eq!(hours_of(&monthly)[0], 8.0);
    }

    #[test]
    fn test_event_timestamps_combine_date_and_time() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,1970-01-02,08:15:00,16:45:00
",
        );

        let events = event_hours(&df).unwrap();
        let nanos = |name: &str| {
            events
                .column(name)
                .unwrap()
                .cast(&DataType::Int64)
                .unwrap()
                .i64()
                .unwrap()
                .get(0)
        };
        let second = 1_000_000_000i64;

        assert_eq!(
            events.column("checkin_at").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Nanoseconds, None)
        );
        assert_eq!(nanos("checkin_at"), Some(NANOS_PER_DAY + (8 * 3600 + 15 * 60) * second));
        assert_eq!(nanos("checkout_at"), Some(NANOS_PER_DAY + (16 * 3600 + 45 * 60) * second));
        assert_relative_eq!(hours_of(&events)[0], 8.5);
    }

    #[test]
    fn test_monthly_sum_per_employee() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,2024-03-01,09:00:00,17:00:00
2,1,2024-03-02,09:00:00,13:30:00
3,2,2024-03-01,10:00:00,12:00:00
4,1,2024-04-01,09:00:00,10:00:00
5,1,2023-03-15,09:00:00,11:00:00
",
        );

        let monthly = monthly_employee_hours(&df).unwrap();
        assert_eq!(monthly.height(), 4);

        let years: Vec<_> = monthly.column("year").unwrap().i32().unwrap().into_iter().flatten().collect();
        let months: Vec<_> = monthly.column("month").unwrap().i32().unwrap().into_iter().flatten().collect();
        let employees: Vec<_> = monthly.column("employee_id").unwrap().i64().unwrap().into_iter().flatten().collect();

        assert_eq!(years, vec![2023, 2024, 2024, 2024]);
        assert_eq!(months, vec![3, 3, 3, 4]);
        assert_eq!(employees, vec![1, 1, 2, 1]);
        assert_eq!(hours_of(&monthly), vec![2.0, 12.5, 2.0, 1.0]);
    }

    #[test]
    fn test_monthly_sum_matches_event_sum() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,7,2024-05-01,07:12:00,15:48:00
2,7,2024-05-02,08:01:30,17:59:59
3,7,2024-05-03,09:00:00,09:00:00
",
        );

        let events_total: f64 = hours_of(&event_hours(&df).unwrap()).iter().sum();
        let monthly = monthly_employee_hours(&df).unwrap();

        assert_eq!(monthly.height(), 1);
        assert_relative_eq!(hours_of(&monthly)[0], events_total, epsilon = 1e-9);
    }

    #[test]
    fn test_checkout_before_checkin_is_negative() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,2024-03-01,22:00:00,02:00:00
",
        );

        let monthly = monthly_employee_hours(&df).unwrap();
        assert_relative_eq!(hours_of(&monthly)[0], -20.0);
    }

    #[test]
    fn test_invalid_time_is_an_error() {
        let df = timesheets(
            "timesheet_id,employee_id,date,checkin,checkout
1,1,2024-03-01,morning,17:00:00
",
        );

        let err = monthly_employee_hours(&df).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidTime { ref column, ref value } if column == "checkin" && value == "morning"
        ));
    }

    #[test]
    fn test_date_must_be_parsed() {
        let df = read_csv(
            tables::TIMESHEETS_RAW,
            "timesheet_id,employee_id,date,checkin,checkout\n1,1,2024-03-01,09:00:00,17:00:00\n"
                .as_bytes(),
            &[],
        )
        .unwrap();

        let err = monthly_employee_hours(&df).unwrap_err();
        assert!(matches!(err, TransformError::ColumnType { ref column, .. } if column == "date"));
    }

    #[test]
    fn test_missing_column() {
        let df = timesheets("timesheet_id,employee_id,date,checkin\n1,1,2024-03-01,09:00:00\n");
        let err = monthly_employee_hours(&df).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { ref column, .. } if column == "checkout"));
    }
}

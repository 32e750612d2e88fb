//! Load stage: writes the output tables to the store.

use crate::error::Result;
use crate::store::Store;
use paysheet_data::{TableSet, tables};
use tracing::{debug, info};

/// Table set entries and the store tables they are written to.
pub const TARGETS: [(&str, &str); 3] = [
    (tables::EMPLOYEES_RAW, "employees"),
    (tables::TIMESHEETS_RAW, "timesheets"),
    (tables::BRANCH_SALARY, "branch_salary"),
];

/// Replace the three output tables in `store` with the contents of `input`.
///
/// All three tables must be present before anything is written. Each table
/// is replaced in its own transaction; a failure stops the load.
pub fn load(input: &TableSet, store: &Store) -> Result<()> {
    info!("[LOAD] Load data into database.");

    let frames = TARGETS
        .iter()
        .map(|(source, target)| Ok((*target, input.get(source)?)))
        .collect::<Result<Vec<_>>>()?;

    for (target, df) in frames {
        let rows = store.replace_table(target, df)?;
        debug!(table = target, rows, "loaded");
    }

    info!("[LOAD] DONE.");
    Ok(())
}

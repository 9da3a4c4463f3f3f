//! `info` command: column inventory for one snapshot file

use crate::cli::logging::{log, LogLevel};
use crate::config::InfoArgs;
use crate::dataset::{load_snapshot, ColumnValues};
use crate::stats::{mean, std_dev};
use std::collections::BTreeSet;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let snapshot = load_snapshot(&args.file).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "{}: {} columns, {} rows",
            args.file.display(),
            snapshot.num_columns(),
            snapshot.num_rows()
        ),
    );

    for column in snapshot.columns() {
        let line = match &column.values {
            ColumnValues::Numeric(_) => {
                let clean = column.values.numeric_clean();
                format!(
                    "  {:<24} numeric      present={:<6} mean={:.4} std={:.4}",
                    column.name,
                    clean.len(),
                    mean(&clean),
                    std_dev(&clean)
                )
            }
            ColumnValues::Categorical(_) => {
                let clean = column.values.categorical_clean();
                let distinct: BTreeSet<&str> = clean.iter().copied().collect();
                format!(
                    "  {:<24} categorical  present={:<6} distinct={}",
                    column.name,
                    clean.len(),
                    distinct.len()
                )
            }
        };
        log(level, LogLevel::Normal, &line);
    }

    Ok(())
}

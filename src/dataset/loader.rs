//! CSV snapshot loading and cross-file validation
//!
//! Loads the three snapshot files for an autopsy run and enforces the one
//! invariant the engine assumes: all snapshots share an identical column
//! set. Header names are normalized before comparison so hidden
//! whitespace, case, or BOM differences between exports do not produce
//! spurious mismatches.

use super::column::{Column, ColumnValues};
use super::snapshot::DatasetSnapshot;
use crate::error::{AutopsiaError, AutopsiaResult};
use std::collections::BTreeSet;
use std::path::Path;

/// Cell markers treated as missing, compared case-insensitively
const MISSING_MARKERS: [&str; 5] = ["", "na", "nan", "null", "none"];

/// Result of loading and validating the three snapshot files.
///
/// Warnings are non-blocking findings (for now: categorical values present
/// after the failure but never seen in the baseline) that the CLI surfaces
/// to the user.
#[derive(Debug)]
pub struct LoadedSnapshots {
    pub baseline: DatasetSnapshot,
    pub pre_failure: DatasetSnapshot,
    pub post_failure: DatasetSnapshot,
    pub warnings: Vec<String>,
}

/// Load a single CSV file into a typed snapshot.
///
/// A column is numeric iff every non-missing cell parses as `f64`;
/// otherwise it is categorical.
pub fn load_snapshot(path: &Path) -> AutopsiaResult<DatasetSnapshot> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes);
    let records = parse_csv(&text).map_err(|message| AutopsiaError::Csv {
        path: path.display().to_string(),
        message,
    })?;

    let mut rows = records.into_iter();
    let header = rows.next().ok_or_else(|| AutopsiaError::EmptyDataset(path.display().to_string()))?;
    let names: Vec<String> = header.iter().map(|h| normalize_column_name(h)).collect();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (i, slot) in cells.iter_mut().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            slot.push(parse_cell(cell));
        }
    }

    if cells.first().is_none_or(Vec::is_empty) {
        return Err(AutopsiaError::EmptyDataset(path.display().to_string()));
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column { name, values: infer_values(raw) })
        .collect();

    Ok(DatasetSnapshot::new(columns))
}

/// Load baseline, pre-failure, and post-failure snapshots and validate
/// that they share an identical column set. Pre/post columns are
/// reordered to the baseline's order.
pub fn load_and_validate(
    baseline_path: &Path,
    pre_failure_path: &Path,
    post_failure_path: &Path,
) -> AutopsiaResult<LoadedSnapshots> {
    let baseline = load_snapshot(baseline_path)?;
    let mut pre_failure = load_snapshot(pre_failure_path)?;
    let mut post_failure = load_snapshot(post_failure_path)?;

    let base_cols: BTreeSet<&str> = baseline.column_names().into_iter().collect();
    let pre_cols: BTreeSet<&str> = pre_failure.column_names().into_iter().collect();
    let post_cols: BTreeSet<&str> = post_failure.column_names().into_iter().collect();

    if base_cols != pre_cols || base_cols != post_cols {
        return Err(AutopsiaError::SchemaMismatch(describe_mismatch(
            &base_cols, &pre_cols, &post_cols,
        )));
    }

    let order = baseline.column_names();
    pre_failure.reorder(&order);
    post_failure.reorder(&order);

    let warnings = unseen_category_warnings(&baseline, &post_failure);

    Ok(LoadedSnapshots { baseline, pre_failure, post_failure, warnings })
}

/// Decode file bytes: UTF-8 with BOM stripped, Latin-1 as fallback so no
/// byte sequence is rejected outright.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Minimal CSV record parser: comma-separated, double-quoted fields may
/// contain commas, newlines, and doubled quotes.
fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, String> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    record.push(std::mem::take(&mut field));
                }
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    if !(record.len() == 1 && record[0].is_empty()) {
                        records.push(std::mem::take(&mut record));
                    } else {
                        record.clear();
                    }
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

/// Normalize a header name: trim, lowercase, drop BOM and zero-width
/// characters, collapse internal whitespace runs to one space.
fn normalize_column_name(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '\u{feff}' && *c != '\u{200b}').collect();
    cleaned.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_cell(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if MISSING_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m)) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Type a raw column: numeric iff all present cells parse as f64.
fn infer_values(raw: Vec<Option<String>>) -> ColumnValues {
    let all_numeric =
        raw.iter().flatten().all(|cell| cell.parse::<f64>().is_ok()) && raw.iter().any(Option::is_some);
    if all_numeric {
        ColumnValues::Numeric(raw.into_iter().map(|cell| cell.and_then(|c| c.parse().ok())).collect())
    } else {
        ColumnValues::Categorical(raw)
    }
}

fn describe_mismatch(
    base: &BTreeSet<&str>,
    pre: &BTreeSet<&str>,
    post: &BTreeSet<&str>,
) -> String {
    let mut parts = Vec::new();
    let report = |label: &str, cols: &BTreeSet<&str>, parts: &mut Vec<String>| {
        let missing: Vec<&str> = base.difference(cols).copied().collect();
        let extra: Vec<&str> = cols.difference(base).copied().collect();
        if !missing.is_empty() {
            parts.push(format!("missing in {label}: {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            parts.push(format!("extra in {label}: {}", extra.join(", ")));
        }
    };
    report("pre_failure", pre, &mut parts);
    report("post_failure", post, &mut parts);
    parts.join("; ")
}

/// Categorical values observed after the failure but never in the
/// baseline. These frequently explain a model failure outright, so the
/// loader flags them even though the engine will surface them again.
fn unseen_category_warnings(baseline: &DatasetSnapshot, post: &DatasetSnapshot) -> Vec<String> {
    let mut warnings = Vec::new();
    for col in baseline.columns() {
        let (ColumnValues::Categorical(_), Some(post_values)) = (&col.values, post.values(&col.name))
        else {
            continue;
        };
        let seen: BTreeSet<&str> = col.values.categorical_clean().into_iter().collect();
        let new: Vec<&str> = post_values
            .categorical_clean()
            .into_iter()
            .filter(|v| !seen.contains(v))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect();
        if !new.is_empty() {
            warnings.push(format!(
                "column '{}' has categorical values unseen in baseline: {}",
                col.name,
                new.join(", ")
            ));
        }
    }
    warnings
}

//! CSV dataset loading implementation.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use ridelens_core::{Dataset, DayType, RidershipRecord};

use crate::DataSource;

/// Loads the daily ridership table from a CSV file.
pub struct CsvLoader {
    path: std::path::PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvLoader {
    fn load(&self) -> anyhow::Result<Dataset> {
        load_dataset_from_csv(&self.path)
    }
}

/// Load the ridership table from a CSV file and log a coverage summary.
///
/// Expected format: a header row with a `date` column (ISO dates), a
/// `day_type` column (`W`/`A`/`U`), and one integer column per
/// transportation mode. The mode columns keep their file order.
pub fn load_dataset_from_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    // Find column indices from headers
    let headers = reader.headers()?.clone();
    let headers_lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let date_col = headers_lower.iter().position(|h| h == "date");
    let day_type_col = headers_lower
        .iter()
        .position(|h| h == "day_type" || h == "daytype");

    // Default to standard column order if not found
    let date_col = date_col.unwrap_or(0);
    let day_type_col = day_type_col.unwrap_or(1);

    // Every remaining column is a transportation mode, in file order
    let mode_cols: Vec<usize> = (0..headers.len())
        .filter(|&i| i != date_col && i != day_type_col)
        .collect();
    let modes: Vec<String> = mode_cols
        .iter()
        .map(|&i| headers[i].trim().to_string())
        .collect();
    if modes.is_empty() {
        anyhow::bail!("dataset {} has no mode columns", path.display());
    }

    let mut records = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let date_str = record.get(date_col).unwrap_or("").trim();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .with_context(|| format!("row {}: invalid date {:?}", line + 2, date_str))?;

        let code = record.get(day_type_col).unwrap_or("").trim();
        let day_type = DayType::from_code(code)
            .with_context(|| format!("row {}: unknown day_type code {:?}", line + 2, code))?;

        let mut counts = Vec::with_capacity(mode_cols.len());
        for &col in &mode_cols {
            let count: u64 = record
                .get(col)
                .unwrap_or("0")
                .trim()
                .parse()
                .with_context(|| format!("row {}: bad count in column {:?}", line + 2, &headers[col]))?;
            counts.push(count);
        }

        records.push(RidershipRecord::new(date, day_type, counts));
    }

    let dataset = Dataset::new(modes, records);
    analyze_coverage(&dataset);
    Ok(dataset)
}

/// Log record count, span and day-level gaps for a freshly loaded dataset.
pub fn analyze_coverage(dataset: &Dataset) {
    let Some((first, last)) = dataset.date_span() else {
        log::warn!("dataset is empty, nothing to analyze");
        return;
    };

    let mut total_gaps = 0u32;
    let mut total_missing = 0i64;
    let mut largest_gap = 0i64;
    let mut largest_gap_start = first;

    for pair in dataset.records().windows(2) {
        let diff = (pair[1].date - pair[0].date).num_days();
        if diff > 1 {
            total_gaps += 1;
            total_missing += diff - 1;
            if diff > largest_gap {
                largest_gap = diff;
                largest_gap_start = pair[0].date;
            }
        }
    }

    let span_days = (last - first).num_days() + 1;
    let coverage_pct = (dataset.len() as f64 / span_days as f64) * 100.0;

    log::info!(
        "loaded {} records over {} ({} to {}), modes [{}]",
        dataset.len(),
        format_days(span_days),
        first,
        last,
        dataset.modes().join(", ")
    );
    log::info!(
        "coverage {:.2}%: {} missing days across {} gaps",
        coverage_pct,
        total_missing,
        total_gaps
    );
    if largest_gap > 1 {
        log::info!(
            "largest gap: {} days starting after {}",
            largest_gap - 1,
            largest_gap_start
        );
    }
}

fn format_days(days: i64) -> String {
    if days >= 365 {
        format!("{:.1} years", days as f64 / 365.25)
    } else {
        format!("{days} days")
    }
}

//! The aggregation engine: filter, resample, reduce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{Dataset, DayType, RidershipRecord};
use crate::resolution::Resolution;
use crate::series::{Series, SeriesPoint};

/// How bucket values are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Mean,
    Sum,
}

impl Aggregation {
    /// Returns a short label for this aggregation.
    pub fn label(&self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::Sum => "sum",
        }
    }

    /// Returns all available aggregations in order.
    pub fn all() -> &'static [Aggregation] {
        &[Aggregation::Mean, Aggregation::Sum]
    }
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when the date lies inside the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which service-day classes pass the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTypeFilter {
    include: [bool; 3],
}

impl DayTypeFilter {
    /// All three day types pass (the default).
    pub fn all() -> Self {
        Self {
            include: [true; 3],
        }
    }

    /// Only the listed day types pass.
    pub fn only(day_types: &[DayType]) -> Self {
        let mut include = [false; 3];
        for dt in day_types {
            include[*dt as usize] = true;
        }
        Self { include }
    }

    /// Only the weekday service class passes.
    pub fn weekdays() -> Self {
        Self::only(&[DayType::Weekday])
    }

    /// Saturday/holiday and Sunday service classes pass.
    pub fn non_weekdays() -> Self {
        Self::only(&[DayType::SaturdayHoliday, DayType::Sunday])
    }

    /// True when the given day type passes the filter.
    pub fn contains(&self, day_type: DayType) -> bool {
        self.include[day_type as usize]
    }
}

impl Default for DayTypeFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Fully determines a derived series; no hidden state.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub range: DateRange,
    /// Projected modes, in output column order. Must be non-empty and known
    /// to the dataset.
    pub modes: Vec<String>,
    pub resolution: Resolution,
    pub aggregation: Aggregation,
    pub day_types: DayTypeFilter,
}

impl FilterSpec {
    /// Creates a spec including all day types.
    pub fn new(
        range: DateRange,
        modes: Vec<String>,
        resolution: Resolution,
        aggregation: Aggregation,
    ) -> Self {
        Self {
            range,
            modes,
            resolution,
            aggregation,
            day_types: DayTypeFilter::all(),
        }
    }

    /// Restricts the spec to the given day types.
    pub fn with_day_types(mut self, day_types: DayTypeFilter) -> Self {
        self.day_types = day_types;
        self
    }
}

/// A malformed [`FilterSpec`], rejected before any aggregation work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFilter {
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("mode selection is empty")]
    EmptyModes,
    #[error("date range ends before it starts: {start} > {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Accumulator for one resample bucket.
struct Bucket {
    key: NaiveDate,
    label: NaiveDate,
    sums: Vec<f64>,
    count: u32,
}

impl Bucket {
    fn start(key: NaiveDate, record: &RidershipRecord, columns: &[usize]) -> Self {
        Self {
            key,
            label: record.date,
            sums: columns.iter().map(|&c| record.counts[c] as f64).collect(),
            count: 1,
        }
    }

    fn push(&mut self, record: &RidershipRecord, columns: &[usize]) {
        for (sum, &c) in self.sums.iter_mut().zip(columns) {
            *sum += record.counts[c] as f64;
        }
        self.count += 1;
        self.label = record.date;
    }

    fn finish(self, aggregation: Aggregation) -> SeriesPoint {
        let values = match aggregation {
            Aggregation::Sum => self.sums,
            Aggregation::Mean => {
                let n = f64::from(self.count);
                self.sums.into_iter().map(|s| s / n).collect()
            }
        };
        SeriesPoint::new(self.label, values)
    }
}

/// Applies a [`FilterSpec`] to a dataset and produces the chart series.
///
/// Filters records to the spec's day types and inclusive date range,
/// projects the requested mode columns, groups by resolution bucket and
/// reduces each bucket with the spec's aggregation. Buckets with no
/// records are dropped; each emitted bucket is dated by its last record,
/// which keeps every point inside the requested range even when the range
/// cuts a week or month short. The mean denominator is the number of
/// records actually present in the bucket.
///
/// Returns an empty series, not an error, when nothing matches.
pub fn aggregate(dataset: &Dataset, spec: &FilterSpec) -> Result<Series, InvalidFilter> {
    if spec.modes.is_empty() {
        return Err(InvalidFilter::EmptyModes);
    }
    if spec.range.start > spec.range.end {
        return Err(InvalidFilter::InvertedRange {
            start: spec.range.start,
            end: spec.range.end,
        });
    }
    let mut columns = Vec::with_capacity(spec.modes.len());
    for mode in &spec.modes {
        match dataset.mode_index(mode) {
            Some(idx) => columns.push(idx),
            None => return Err(InvalidFilter::UnknownMode(mode.clone())),
        }
    }

    let mut points = Vec::new();
    let mut current: Option<Bucket> = None;

    // Records are sorted by date, so bucket keys arrive in ascending order
    // and a single pass suffices.
    for record in dataset.records() {
        if !spec.range.contains(record.date) || !spec.day_types.contains(record.day_type) {
            continue;
        }
        let key = spec.resolution.bucket_date(record.date);

        match current {
            Some(ref mut bucket) if bucket.key == key => bucket.push(record, &columns),
            _ => {
                if let Some(bucket) = current.take() {
                    points.push(bucket.finish(spec.aggregation));
                }
                current = Some(Bucket::start(key, record, &columns));
            }
        }
    }

    // Don't forget the last bucket
    if let Some(bucket) = current {
        points.push(bucket.finish(spec.aggregation));
    }

    Ok(Series::new(spec.modes.clone(), points))
}

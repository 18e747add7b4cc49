//! Series container for aggregation output.

use chrono::NaiveDate;

/// One resample bucket: its date and one value per projected mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Values parallel to the owning series' mode list.
    pub values: Vec<f64>,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, values: Vec<f64>) -> Self {
        Self { date, values }
    }
}

/// A date-ordered, aggregated series ready for charting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    modes: Vec<String>,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Creates a series over the given modes.
    pub fn new(modes: Vec<String>, points: Vec<SeriesPoint>) -> Self {
        Self { modes, points }
    }

    /// Creates an empty series over the given modes.
    pub fn empty(modes: Vec<String>) -> Self {
        Self {
            modes,
            points: Vec::new(),
        }
    }

    /// The projected modes, in value order.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// The bucket points, ascending by date.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Returns the number of buckets in this series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if this series has no buckets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the first bucket, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last bucket, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Extracts one mode's values as a column, if the mode is present.
    pub fn column(&self, mode: &str) -> Option<Vec<f64>> {
        let idx = self.modes.iter().position(|m| m == mode)?;
        Some(self.points.iter().map(|p| p.values[idx]).collect())
    }
}

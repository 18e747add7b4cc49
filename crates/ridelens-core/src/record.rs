//! Ridership records and the dataset container.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Service-day classification attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    /// Monday through Friday, excluding holidays.
    Weekday,
    /// Saturdays and holidays, which share a reduced schedule.
    SaturdayHoliday,
    /// Sundays.
    Sunday,
}

impl DayType {
    /// Parses the single-letter code used by the input table.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(DayType::Weekday),
            "A" => Some(DayType::SaturdayHoliday),
            "U" => Some(DayType::Sunday),
            _ => None,
        }
    }

    /// Returns the single-letter code for this day type.
    pub fn code(&self) -> &'static str {
        match self {
            DayType::Weekday => "W",
            DayType::SaturdayHoliday => "A",
            DayType::Sunday => "U",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::SaturdayHoliday => "Saturday/Holiday",
            DayType::Sunday => "Sunday",
        }
    }

    /// Returns all day types in order.
    pub fn all() -> &'static [DayType] {
        &[DayType::Weekday, DayType::SaturdayHoliday, DayType::Sunday]
    }

    /// True for the weekday service class.
    pub fn is_weekday(&self) -> bool {
        matches!(self, DayType::Weekday)
    }
}

/// One day of ridership: the date, its service class, and one count per mode.
///
/// `counts` is parallel to the owning [`Dataset`]'s mode list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RidershipRecord {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub counts: Vec<u64>,
}

impl RidershipRecord {
    pub fn new(date: NaiveDate, day_type: DayType, counts: Vec<u64>) -> Self {
        Self {
            date,
            day_type,
            counts,
        }
    }
}

/// The immutable daily ridership table.
///
/// Loaded once at startup and never mutated. Records are kept sorted
/// ascending by date; every record's `counts` has one entry per mode in
/// `modes`, in the same order.
#[derive(Debug, Clone)]
pub struct Dataset {
    modes: Vec<String>,
    records: Vec<RidershipRecord>,
}

impl Dataset {
    /// Builds a dataset, sorting the records ascending by date.
    pub fn new(modes: Vec<String>, mut records: Vec<RidershipRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { modes, records }
    }

    /// The transportation modes, in column order.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Position of a mode in the count columns, if known.
    pub fn mode_index(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|m| m == name)
    }

    /// The records, sorted ascending by date.
    pub fn records(&self) -> &[RidershipRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last record dates, if any records exist.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

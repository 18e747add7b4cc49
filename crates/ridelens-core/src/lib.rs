//! Core types for the ridelens application.
//!
//! This crate provides the data model and the aggregation engine:
//! - `RidershipRecord` / `Dataset` - raw daily ridership data
//! - `Resolution` - calendar bucketing (daily, weekly, monthly)
//! - `FilterSpec` / `aggregate` - filter, resample and reduce a dataset
//! - `Series` - the aggregated output behind every chart

pub mod aggregate;
pub mod record;
pub mod resolution;
pub mod series;

pub use aggregate::{aggregate, Aggregation, DateRange, DayTypeFilter, FilterSpec, InvalidFilter};
pub use record::{Dataset, DayType, RidershipRecord};
pub use resolution::Resolution;
pub use series::{Series, SeriesPoint};

//! Data loading utilities for ridelens.

pub mod csv;
pub mod source;

pub use self::csv::CsvLoader;
pub use source::DataSource;

//! Data source trait definition.

use ridelens_core::Dataset;

/// Trait for types that can load the ridership dataset.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    fn load(&self) -> anyhow::Result<Dataset>;
}

//! Typed events and commands for the dashboard core.
//!
//! User interactions arrive as [`AppEvent`]s, one handled per synchronous
//! turn; the session answers with [`Command`]s telling the presentation
//! layer which regions and widgets to refresh. The [`EventBus`] queues
//! both in FIFO order.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::{
    AppEvent, Command, ComparisonEvent, ControlEvent, RangeEvent, Region, Selector,
};

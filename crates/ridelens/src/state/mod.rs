//! Session state management.
//!
//! This module decomposes the dashboard state into focused sub-states:
//! - [`ControlsState`]: the two selector sets and the synchronize toggle
//! - [`SelectionState`]: date pickers and the effective selected range
//! - [`ComparisonRegistry`]: saved timeframes in insertion order
//! - [`PinningState`]: close-comparison slot assignment
//! - [`DashboardSnapshot`]: immutable view handed to the presentation layer
//!
//! The [`SessionState`](crate::session::SessionState) struct composes these
//! together and handles one event per synchronous turn.

pub mod comparison;
pub mod controls;
pub mod pinning;
pub mod selection;
pub mod snapshot;

pub use comparison::ComparisonEntry;
pub use comparison::ComparisonRegistry;
pub use comparison::EntryId;
pub use controls::ControlsState;
pub use controls::SelectorValues;
pub use pinning::PaneSlot;
pub use pinning::PinningState;
pub use selection::SelectionState;
pub use snapshot::ChoiceOption;
pub use snapshot::ComparisonCard;
pub use snapshot::DashboardSnapshot;
pub use snapshot::DashboardSnapshotBuilder;
pub use snapshot::DayTypeSplit;
pub use snapshot::PaneView;
pub use snapshot::RegionVisibility;
pub use snapshot::SelectorPanel;
pub use snapshot::PANE_PLACEHOLDER;

//! # ridelens
//!
//! Core of an interactive transit-ridership dashboard: typed events in,
//! recomputed series and presentation commands out.
//!
//! - **Events**: every widget interaction arrives as a tagged [`AppEvent`]
//! - **Session**: [`SessionState`] handles one event per synchronous turn
//! - **Snapshot**: [`DashboardSnapshot`] is the immutable render view
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use ridelens::{AppEvent, EventBus, Selector, SessionState};
//! use ridelens_config::Config;
//! use ridelens_data::{CsvLoader, DataSource};
//!
//! let config = Config::load_default();
//! let dataset = Arc::new(CsvLoader::new(&config.data.path).load()?);
//! let mut session = SessionState::new(dataset, &config);
//!
//! let mut bus = EventBus::new();
//! bus.emit(AppEvent::set_modes(Selector::Primary, ["bus"]));
//! session.process(&mut bus);
//!
//! let snapshot = session.snapshot();
//! // hand snapshot + drained commands to the presentation layer
//! ```

pub mod events;
pub mod session;
pub mod state;

// Re-exports for convenience
pub use events::{AppEvent, Command, EventBus, Region, Selector};
pub use session::SessionState;
pub use state::{DashboardSnapshot, EntryId, PaneSlot, PaneView, PANE_PLACEHOLDER};

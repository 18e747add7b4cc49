//! Event and command type definitions.
//!
//! This module defines the core event types used throughout the ridelens
//! application:
//! - [`AppEvent`] - Semantic dashboard events coming from the presentation layer
//! - [`Command`] - Presentation update commands produced by the session
//!
//! Every widget interaction arrives as a tagged event naming the control that
//! fired it, rather than being reverse-engineered from widget identifiers.

use chrono::NaiveDate;

use ridelens_core::{Aggregation, Resolution};

use crate::state::comparison::EntryId;
use crate::state::pinning::PaneSlot;

/// Identifies one of the two selector sets driving the charts.
///
/// The primary selectors feed the always-visible overview chart; the
/// secondary selectors feed the zoomed and day-type charts and may be
/// mirrored from the primary set while synchronization is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Controls above the overview chart.
    Primary,
    /// Controls for the zoomed and day-type charts.
    Secondary,
}

impl Selector {
    /// Get a human-readable name for this selector set.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Selector::Primary => "primary",
            Selector::Secondary => "secondary",
        }
    }
}

/// Chart regions that can be redrawn independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Full-span overview chart.
    Overview,
    /// Zoomed chart over the current date selection.
    Zoomed,
    /// Day-type split charts over the current date selection.
    DayTypes,
}

/// Selector change events.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// The mode multi-select changed.
    ModesChanged {
        selector: Selector,
        modes: Vec<String>,
    },

    /// The resolution dropdown changed.
    ResolutionChanged {
        selector: Selector,
        resolution: Resolution,
    },

    /// The aggregation dropdown changed.
    AggregationChanged {
        selector: Selector,
        aggregation: Aggregation,
    },
}

/// Date-range selection events.
#[derive(Debug, Clone)]
pub enum RangeEvent {
    /// A brush selection completed on the overview chart.
    BrushSelected { start: NaiveDate, end: NaiveDate },

    /// The date pickers were edited by hand.
    ///
    /// Each field carries the picker's current value; `None` means that
    /// picker is empty. A range only takes effect once both are set.
    PickersEdited {
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    },

    /// The current selection was dismissed.
    Cleared,
}

/// Comparison panel events.
#[derive(Debug, Clone)]
pub enum ComparisonEvent {
    /// The "save timeframe" button was clicked.
    SaveClicked,

    /// A comparison card's delete button was clicked.
    DeleteClicked(EntryId),

    /// A comparison card's pin checkbox was toggled.
    CheckToggled { id: EntryId, checked: bool },
}

/// Semantic dashboard events.
///
/// One event is handled per turn: the session reads current state, computes
/// new derived state, and emits the commands the presentation layer needs to
/// catch up.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Selector change events.
    Control(ControlEvent),

    /// Date-range selection events.
    Range(RangeEvent),

    /// Comparison panel events.
    Comparison(ComparisonEvent),

    /// The "synchronize" toggle changed.
    SynchronizeToggled(bool),

    /// No-op event (useful for widget callbacks with nothing to report).
    None,
}

// Convenience constructors for AppEvent
impl AppEvent {
    /// Create a mode selection event.
    #[must_use]
    pub fn set_modes(selector: Selector, modes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        AppEvent::Control(ControlEvent::ModesChanged {
            selector,
            modes: modes.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a resolution change event.
    #[must_use]
    pub fn set_resolution(selector: Selector, resolution: Resolution) -> Self {
        AppEvent::Control(ControlEvent::ResolutionChanged {
            selector,
            resolution,
        })
    }

    /// Create an aggregation change event.
    #[must_use]
    pub fn set_aggregation(selector: Selector, aggregation: Aggregation) -> Self {
        AppEvent::Control(ControlEvent::AggregationChanged {
            selector,
            aggregation,
        })
    }

    /// Create a brush selection event.
    #[must_use]
    pub fn brush(start: NaiveDate, end: NaiveDate) -> Self {
        AppEvent::Range(RangeEvent::BrushSelected { start, end })
    }

    /// Create a date-picker edit event.
    #[must_use]
    pub fn edit_pickers(from: Option<NaiveDate>, till: Option<NaiveDate>) -> Self {
        AppEvent::Range(RangeEvent::PickersEdited { from, till })
    }

    /// Create a selection-cleared event.
    #[must_use]
    pub fn clear_range() -> Self {
        AppEvent::Range(RangeEvent::Cleared)
    }

    /// Create a save-timeframe event.
    #[must_use]
    pub fn save_timeframe() -> Self {
        AppEvent::Comparison(ComparisonEvent::SaveClicked)
    }

    /// Create a comparison delete event.
    #[must_use]
    pub fn delete_comparison(id: EntryId) -> Self {
        AppEvent::Comparison(ComparisonEvent::DeleteClicked(id))
    }

    /// Create a pin checkbox toggle event.
    #[must_use]
    pub fn toggle_check(id: EntryId, checked: bool) -> Self {
        AppEvent::Comparison(ComparisonEvent::CheckToggled { id, checked })
    }

    /// Create a synchronize toggle event.
    #[must_use]
    pub fn toggle_synchronize(enabled: bool) -> Self {
        AppEvent::SynchronizeToggled(enabled)
    }
}

/// Commands that tell the presentation layer what to refresh.
///
/// Commands are the final step in the event pipeline. Each one names a
/// region or widget group whose backing state has changed this turn.
#[derive(Debug, Clone)]
pub enum Command {
    /// Redraw a chart region from its recomputed series.
    Redraw(Region),

    /// Redraw one close-comparison pane.
    RedrawPane(PaneSlot),

    /// Re-derive which regions are visible.
    UpdateVisibility,

    /// Re-render the selector widgets (values and disabled flags).
    RefreshControls,

    /// Re-render the comparison card list.
    RefreshComparisonList,

    /// Batch multiple commands together.
    Batch(Vec<Command>),
}

impl Command {
    /// Create a batch of commands.
    #[must_use]
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        Command::Batch(commands.into_iter().collect())
    }

    /// Check if this command requires a chart redraw.
    #[must_use]
    pub fn requires_redraw(&self) -> bool {
        match self {
            Command::Redraw(_) => true,
            Command::RedrawPane(_) => true,
            Command::UpdateVisibility => true,
            Command::RefreshControls => false,
            Command::RefreshComparisonList => true,
            Command::Batch(cmds) => cmds.iter().any(|c| c.requires_redraw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_event_constructors() {
        let brush = AppEvent::brush(
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 6, 30).unwrap(),
        );
        assert!(matches!(brush, AppEvent::Range(RangeEvent::BrushSelected { .. })));

        let modes = AppEvent::set_modes(Selector::Primary, ["bus", "rail"]);
        match modes {
            AppEvent::Control(ControlEvent::ModesChanged { selector, modes }) => {
                assert_eq!(selector, Selector::Primary);
                assert_eq!(modes, vec!["bus".to_string(), "rail".to_string()]);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let check = AppEvent::toggle_check(EntryId(3), true);
        assert!(matches!(
            check,
            AppEvent::Comparison(ComparisonEvent::CheckToggled { id: EntryId(3), checked: true })
        ));
    }

    #[test]
    fn test_selector_names() {
        assert_eq!(Selector::Primary.name(), "primary");
        assert_eq!(Selector::Secondary.name(), "secondary");
    }

    #[test]
    fn test_command_requires_redraw() {
        assert!(Command::Redraw(Region::Overview).requires_redraw());
        assert!(Command::RedrawPane(PaneSlot::Left).requires_redraw());
        assert!(!Command::RefreshControls.requires_redraw());

        let batch = Command::batch([Command::RefreshControls, Command::Redraw(Region::Zoomed)]);
        assert!(batch.requires_redraw());

        let quiet_batch = Command::batch([Command::RefreshControls]);
        assert!(!quiet_batch.requires_redraw());
    }
}

//! Dashboard snapshot for decoupled rendering.
//!
//! This module provides [`DashboardSnapshot`], an immutable snapshot of
//! everything the presentation layer needs to draw the dashboard. Building
//! one per turn decouples rendering from the mutable session state.

use chrono::NaiveDate;

use ridelens_core::{Aggregation, Resolution, Series};

use crate::state::comparison::EntryId;
use crate::state::pinning::PaneSlot;

/// Text shown in a close-comparison pane with nothing pinned.
pub const PANE_PLACEHOLDER: &str = "please check graphs to compare";

/// Visibility of the regions that depend on a date selection.
///
/// All three derive from "is a date range currently set"; they are carried
/// separately because the presentation layer toggles each one on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionVisibility {
    /// Zoomed chart over the selection.
    pub zoomed: bool,
    /// Day-type split charts over the selection.
    pub day_types: bool,
    /// Table row holding the secondary selector widgets.
    pub detail_row: bool,
}

impl RegionVisibility {
    /// Derive visibility from whether a selection exists.
    #[must_use]
    pub fn for_selection(active: bool) -> Self {
        Self {
            zoomed: active,
            day_types: active,
            detail_row: active,
        }
    }
}

/// One option in a selector widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub disabled: bool,
}

/// Widget state for one selector set.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPanel {
    /// Every known mode, each with its disabled flag.
    pub mode_options: Vec<ChoiceOption>,
    /// Modes currently selected.
    pub selected_modes: Vec<String>,
    pub resolution: Resolution,
    pub aggregation: Aggregation,
    /// False while this set is mirrored from the primary selectors.
    pub enabled: bool,
}

impl SelectorPanel {
    fn empty() -> Self {
        Self {
            mode_options: Vec::new(),
            selected_modes: Vec::new(),
            resolution: Resolution::Weekly,
            aggregation: Aggregation::Mean,
            enabled: true,
        }
    }
}

/// The two series of the day-type split view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayTypeSplit {
    /// Weekdays only.
    pub weekday: Series,
    /// Saturdays, Sundays and holidays.
    pub other: Series,
}

/// Render state for one comparison card.
#[derive(Debug, Clone)]
pub struct ComparisonCard {
    pub id: EntryId,
    /// Header label built from the saved range.
    pub label: String,
    pub modes: Vec<String>,
    /// Daily preview over the saved range, all day types.
    pub overview: Series,
    /// Daily preview split by day type.
    pub day_types: DayTypeSplit,
    pub checked: bool,
    /// Whether the pin checkbox is disabled (both panes taken).
    pub check_disabled: bool,
}

/// Content of one close-comparison pane.
#[derive(Debug, Clone, Default)]
pub enum PaneView {
    /// Nothing pinned; render [`PANE_PLACEHOLDER`].
    #[default]
    Placeholder,

    /// A pinned entry and its recomputed series.
    Pinned {
        id: EntryId,
        /// Header label from the pinned entry's range.
        label: String,
        series: Series,
    },
}

impl PaneView {
    /// Check if this pane shows the placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PaneView::Placeholder)
    }

    /// The pane header text.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            PaneView::Placeholder => PANE_PLACEHOLDER,
            PaneView::Pinned { label, .. } => label,
        }
    }
}

/// Immutable snapshot of everything the presentation layer draws.
///
/// Captured from the session after each handled event; the presentation
/// layer reads it without ever touching mutable state.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// Full-span series behind the overview chart.
    pub overview: Series,

    /// Series behind the zoomed chart (empty while hidden).
    pub zoomed: Series,

    /// Series pair behind the day-type split view.
    pub day_types: DayTypeSplit,

    /// Which selection-dependent regions are visible.
    pub visibility: RegionVisibility,

    /// Primary selector widgets.
    pub primary_controls: SelectorPanel,

    /// Secondary selector widgets.
    pub secondary_controls: SelectorPanel,

    /// Whether the synchronize toggle is on.
    pub synchronize: bool,

    /// Current date-picker values.
    pub from: Option<NaiveDate>,
    pub till: Option<NaiveDate>,

    /// Comparison cards in insertion order.
    pub cards: Vec<ComparisonCard>,

    /// Left close-comparison pane.
    pub left_pane: PaneView,

    /// Right close-comparison pane.
    pub right_pane: PaneView,
}

impl DashboardSnapshot {
    /// Create a snapshot with nothing loaded and nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overview: Series::default(),
            zoomed: Series::default(),
            day_types: DayTypeSplit::default(),
            visibility: RegionVisibility::default(),
            primary_controls: SelectorPanel::empty(),
            secondary_controls: SelectorPanel::empty(),
            synchronize: false,
            from: None,
            till: None,
            cards: Vec::new(),
            left_pane: PaneView::Placeholder,
            right_pane: PaneView::Placeholder,
        }
    }

    /// The pane for a given slot.
    #[must_use]
    pub fn pane(&self, slot: PaneSlot) -> &PaneView {
        match slot {
            PaneSlot::Left => &self.left_pane,
            PaneSlot::Right => &self.right_pane,
        }
    }

    /// Whether a date selection is currently active.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.visibility.zoomed
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for assembling a [`DashboardSnapshot`] from session components.
pub struct DashboardSnapshotBuilder {
    snapshot: DashboardSnapshot,
}

impl DashboardSnapshotBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: DashboardSnapshot::new(),
        }
    }

    /// Set the chart series.
    #[must_use]
    pub fn charts(mut self, overview: Series, zoomed: Series, day_types: DayTypeSplit) -> Self {
        self.snapshot.overview = overview;
        self.snapshot.zoomed = zoomed;
        self.snapshot.day_types = day_types;
        self
    }

    /// Set region visibility.
    #[must_use]
    pub fn visibility(mut self, visibility: RegionVisibility) -> Self {
        self.snapshot.visibility = visibility;
        self
    }

    /// Set the selector widget states.
    #[must_use]
    pub fn controls(
        mut self,
        primary: SelectorPanel,
        secondary: SelectorPanel,
        synchronize: bool,
    ) -> Self {
        self.snapshot.primary_controls = primary;
        self.snapshot.secondary_controls = secondary;
        self.snapshot.synchronize = synchronize;
        self
    }

    /// Set the date-picker values.
    #[must_use]
    pub fn pickers(mut self, from: Option<NaiveDate>, till: Option<NaiveDate>) -> Self {
        self.snapshot.from = from;
        self.snapshot.till = till;
        self
    }

    /// Set the comparison cards.
    #[must_use]
    pub fn cards(mut self, cards: Vec<ComparisonCard>) -> Self {
        self.snapshot.cards = cards;
        self
    }

    /// Set the close-comparison panes.
    #[must_use]
    pub fn panes(mut self, left: PaneView, right: PaneView) -> Self {
        self.snapshot.left_pane = left;
        self.snapshot.right_pane = right;
        self
    }

    /// Build the final snapshot.
    #[must_use]
    pub fn build(self) -> DashboardSnapshot {
        self.snapshot
    }
}

impl Default for DashboardSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! One user session of the dashboard core.
//!
//! [`SessionState`] owns all per-session mutable state: selector values,
//! the date selection, saved comparison entries and pin assignments, plus
//! the cached series behind each chart region. Each event is handled as one
//! synchronous turn that reads current state, recomputes whatever derived
//! series changed, and returns the commands the presentation layer needs
//! to catch up. The dataset itself is immutable and shared, so concurrent
//! sessions over the same data need no locking.

use std::sync::Arc;

use ridelens_config::Config;
use ridelens_core::{
    aggregate, Aggregation, Dataset, DateRange, DayTypeFilter, FilterSpec, Resolution, Series,
};

use crate::events::{
    AppEvent, Command, ComparisonEvent, ControlEvent, EventBus, RangeEvent, Region, Selector,
};
use crate::state::{
    ChoiceOption, ComparisonCard, ComparisonRegistry, ControlsState, DashboardSnapshot,
    DashboardSnapshotBuilder, DayTypeSplit, EntryId, PaneSlot, PaneView, PinningState,
    RegionVisibility, SelectionState, SelectorPanel, SelectorValues,
};

/// All mutable state of a single dashboard session.
pub struct SessionState {
    /// The loaded dataset, shared and never mutated.
    dataset: Arc<Dataset>,

    /// The two selector sets and the synchronize toggle.
    pub controls: ControlsState,

    /// Date pickers and the effective selected range.
    pub selection: SelectionState,

    /// Saved timeframes in insertion order.
    pub registry: ComparisonRegistry,

    /// Close-comparison slot assignment.
    pub pinning: PinningState,

    // Cached chart series. When a recompute is declined the previous
    // series stays in place, so the charts never go blank on bad input.
    overview_series: Series,
    zoomed_series: Series,
    weekday_series: Series,
    other_series: Series,
    left_pane_series: Option<Series>,
    right_pane_series: Option<Series>,
}

impl SessionState {
    /// Create a session over a loaded dataset.
    ///
    /// Control defaults come from the config; configured modes missing
    /// from the dataset are dropped, falling back to every known mode.
    pub fn new(dataset: Arc<Dataset>, config: &Config) -> Self {
        let mut modes: Vec<String> = config
            .controls
            .modes
            .iter()
            .filter(|m| dataset.mode_index(m).is_some())
            .cloned()
            .collect();
        if modes.is_empty() {
            if !config.controls.modes.is_empty() {
                log::warn!(
                    "configured modes {:?} not present in dataset, selecting all",
                    config.controls.modes
                );
            }
            modes = dataset.modes().to_vec();
        }

        let defaults = SelectorValues::new(
            modes,
            config.controls.resolution,
            config.controls.aggregation,
        );
        let controls = ControlsState::new(defaults, config.controls.synchronize);

        let mut session = Self {
            dataset,
            controls,
            selection: SelectionState::new(),
            registry: ComparisonRegistry::new(),
            pinning: PinningState::new(),
            overview_series: Series::default(),
            zoomed_series: Series::default(),
            weekday_series: Series::default(),
            other_series: Series::default(),
            left_pane_series: None,
            right_pane_series: None,
        };
        session.recompute_overview();
        session
    }

    /// The dataset this session renders.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Series behind the overview chart.
    #[must_use]
    pub fn overview_series(&self) -> &Series {
        &self.overview_series
    }

    /// Series behind the zoomed chart (empty while hidden).
    #[must_use]
    pub fn zoomed_series(&self) -> &Series {
        &self.zoomed_series
    }

    /// Weekday half of the day-type split.
    #[must_use]
    pub fn weekday_series(&self) -> &Series {
        &self.weekday_series
    }

    /// Saturday/Sunday/holiday half of the day-type split.
    #[must_use]
    pub fn other_series(&self) -> &Series {
        &self.other_series
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Drain all queued events, handling each as one synchronous turn,
    /// and queue the resulting commands back on the bus.
    pub fn process(&mut self, bus: &mut EventBus) {
        for event in bus.take_events() {
            let command = self.handle(event);
            bus.dispatch(command);
        }
    }

    /// Handle one dashboard event.
    ///
    /// Recoverable problems (stale ids, missing selections, malformed
    /// filters) are absorbed here: they log and leave state unchanged
    /// rather than propagate.
    pub fn handle(&mut self, event: AppEvent) -> Command {
        match event {
            AppEvent::Control(event) => self.handle_control(event),
            AppEvent::Range(event) => self.handle_range(event),
            AppEvent::Comparison(event) => self.handle_comparison(event),
            AppEvent::SynchronizeToggled(enabled) => self.handle_synchronize(enabled),
            AppEvent::None => Command::batch([]),
        }
    }

    fn handle_control(&mut self, event: ControlEvent) -> Command {
        let (selector, applied) = match event {
            ControlEvent::ModesChanged { selector, modes } => {
                (selector, self.controls.set_modes(selector, modes))
            }
            ControlEvent::ResolutionChanged {
                selector,
                resolution,
            } => (selector, self.controls.set_resolution(selector, resolution)),
            ControlEvent::AggregationChanged {
                selector,
                aggregation,
            } => (selector, self.controls.set_aggregation(selector, aggregation)),
        };
        if !applied {
            log::debug!("dropped {} selector edit while synchronized", selector.name());
            return Command::batch([]);
        }

        let mut commands = Vec::new();
        if selector == Selector::Primary {
            self.recompute_overview();
            commands.push(Command::Redraw(Region::Overview));
        }
        // The selection charts follow secondary edits directly, and
        // primary edits too while the secondary set is mirrored.
        if (selector == Selector::Secondary || self.controls.synchronized())
            && self.selection.is_active()
        {
            self.recompute_selection_charts();
            commands.push(Command::Redraw(Region::Zoomed));
            commands.push(Command::Redraw(Region::DayTypes));
        }
        commands.push(Command::RefreshControls);
        Command::batch(commands)
    }

    fn handle_range(&mut self, event: RangeEvent) -> Command {
        match event {
            RangeEvent::BrushSelected { start, end } => self.selection.brush(start, end),
            RangeEvent::PickersEdited { from, till } => self.selection.set_pickers(from, till),
            RangeEvent::Cleared => self.selection.clear(),
        }
        self.recompute_selection_charts();

        let mut commands = vec![Command::UpdateVisibility, Command::RefreshControls];
        if self.selection.is_active() {
            commands.push(Command::Redraw(Region::Zoomed));
            commands.push(Command::Redraw(Region::DayTypes));
        }
        Command::batch(commands)
    }

    fn handle_synchronize(&mut self, enabled: bool) -> Command {
        if !self.controls.set_synchronize(enabled) {
            return Command::batch([]);
        }
        let mut commands = vec![Command::RefreshControls];
        if enabled && self.selection.is_active() {
            // The secondary values may have jumped to the primary ones
            self.recompute_selection_charts();
            commands.push(Command::Redraw(Region::Zoomed));
            commands.push(Command::Redraw(Region::DayTypes));
        }
        Command::batch(commands)
    }

    fn handle_comparison(&mut self, event: ComparisonEvent) -> Command {
        match event {
            ComparisonEvent::SaveClicked => self.handle_save(),
            ComparisonEvent::DeleteClicked(id) => self.handle_delete(id),
            ComparisonEvent::CheckToggled { id, checked } => self.handle_check(id, checked),
        }
    }

    fn handle_save(&mut self) -> Command {
        let Some(range) = self.selection.effective_range() else {
            log::debug!("save requested without a date selection");
            return Command::batch([]);
        };
        let modes = self.controls.secondary.modes.clone();
        if modes.is_empty() {
            log::warn!("save requested with no modes selected");
            return Command::batch([]);
        }

        let overview_spec =
            FilterSpec::new(range, modes.clone(), Resolution::Daily, Aggregation::Sum);
        let weekday_spec = overview_spec
            .clone()
            .with_day_types(DayTypeFilter::weekdays());
        let other_spec = overview_spec
            .clone()
            .with_day_types(DayTypeFilter::non_weekdays());
        let overview = self.series_or_empty(&overview_spec);
        let day_types = DayTypeSplit {
            weekday: self.series_or_empty(&weekday_spec),
            other: self.series_or_empty(&other_spec),
        };

        let id = self.registry.save(range, modes, overview, day_types);
        log::info!(
            "saved comparison entry {id} covering {} to {}",
            range.start,
            range.end
        );
        Command::batch([Command::RefreshComparisonList, Command::RefreshControls])
    }

    fn handle_delete(&mut self, id: EntryId) -> Command {
        if !self.registry.remove(id) {
            log::debug!("delete for unknown comparison entry {id}");
            return Command::batch([]);
        }

        // A pinned entry must free its pane in the same turn, and any
        // other stale pin state goes with it.
        let live: Vec<EntryId> = self.registry.ids().collect();
        let freed = self.pinning.resync(|kept| live.contains(&kept));

        let mut commands = vec![Command::RefreshComparisonList, Command::RefreshControls];
        for slot in freed {
            self.set_pane(slot, None);
            commands.push(Command::RedrawPane(slot));
        }
        log::info!("deleted comparison entry {id}");
        Command::batch(commands)
    }

    fn handle_check(&mut self, id: EntryId, checked: bool) -> Command {
        if checked {
            if !self.registry.contains(id) {
                log::debug!("check for unknown comparison entry {id}");
                return Command::batch([]);
            }
            let Some(slot) = self.pinning.check(id) else {
                // Duplicate event, or both panes taken and the checkbox
                // should have been disabled; leave state alone either way
                return Command::batch([]);
            };
            let series = self.pane_series(id);
            self.set_pane(slot, Some(series));
            Command::batch([Command::RedrawPane(slot), Command::RefreshControls])
        } else {
            let Some(slot) = self.pinning.uncheck(id) else {
                return Command::batch([]);
            };
            self.set_pane(slot, None);
            Command::batch([Command::RedrawPane(slot), Command::RefreshControls])
        }
    }

    // =========================================================================
    // Series recomputation
    // =========================================================================

    /// The full dataset span as a range, if any data is loaded.
    fn full_span(&self) -> Option<DateRange> {
        self.dataset
            .date_span()
            .map(|(start, end)| DateRange::new(start, end))
    }

    /// Recompute the overview series from the primary selectors.
    fn recompute_overview(&mut self) {
        let Some(range) = self.full_span() else {
            self.overview_series = Series::default();
            return;
        };
        let values = &self.controls.primary;
        let spec = FilterSpec::new(
            range,
            values.modes.clone(),
            values.resolution,
            values.aggregation,
        );
        Self::recompute_into(&mut self.overview_series, &self.dataset, &spec);
    }

    /// Recompute the zoomed and day-type series from the secondary
    /// selectors over the current selection; cleared while no selection
    /// is active.
    fn recompute_selection_charts(&mut self) {
        let Some(range) = self.selection.effective_range() else {
            self.zoomed_series = Series::default();
            self.weekday_series = Series::default();
            self.other_series = Series::default();
            return;
        };
        let values = &self.controls.secondary;
        let zoomed_spec = FilterSpec::new(
            range,
            values.modes.clone(),
            values.resolution,
            values.aggregation,
        );
        // The day-type split always shows daily values; only the secondary
        // mode selection applies to it.
        let split_spec = FilterSpec::new(
            range,
            values.modes.clone(),
            Resolution::Daily,
            Aggregation::Sum,
        );
        let weekday_spec = split_spec
            .clone()
            .with_day_types(DayTypeFilter::weekdays());
        let other_spec = split_spec.with_day_types(DayTypeFilter::non_weekdays());

        Self::recompute_into(&mut self.zoomed_series, &self.dataset, &zoomed_spec);
        Self::recompute_into(&mut self.weekday_series, &self.dataset, &weekday_spec);
        Self::recompute_into(&mut self.other_series, &self.dataset, &other_spec);
    }

    /// Replace `target` with the aggregated series, or keep it as-is when
    /// the spec is rejected.
    fn recompute_into(target: &mut Series, dataset: &Dataset, spec: &FilterSpec) {
        match aggregate(dataset, spec) {
            Ok(series) => *target = series,
            Err(err) => log::warn!("keeping previous chart: {err}"),
        }
    }

    /// Aggregate a spec, falling back to an empty series on rejection.
    fn series_or_empty(&self, spec: &FilterSpec) -> Series {
        match aggregate(&self.dataset, spec) {
            Ok(series) => series,
            Err(err) => {
                log::warn!("aggregation failed: {err}");
                Series::default()
            }
        }
    }

    /// Build the close-comparison series for a pinned entry.
    ///
    /// Panes always render the entry's own saved range and modes at daily
    /// resolution, independent of whatever the live selectors show.
    fn pane_series(&self, id: EntryId) -> Series {
        let Some(entry) = self.registry.get(id) else {
            return Series::default();
        };
        let spec = FilterSpec::new(
            entry.range,
            entry.modes.clone(),
            Resolution::Daily,
            Aggregation::Sum,
        );
        self.series_or_empty(&spec)
    }

    fn set_pane(&mut self, slot: PaneSlot, series: Option<Series>) {
        match slot {
            PaneSlot::Left => self.left_pane_series = series,
            PaneSlot::Right => self.right_pane_series = series,
        }
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Capture an immutable snapshot for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshotBuilder::new()
            .charts(
                self.overview_series.clone(),
                self.zoomed_series.clone(),
                DayTypeSplit {
                    weekday: self.weekday_series.clone(),
                    other: self.other_series.clone(),
                },
            )
            .visibility(RegionVisibility::for_selection(self.selection.is_active()))
            .controls(
                self.selector_panel(Selector::Primary),
                self.selector_panel(Selector::Secondary),
                self.controls.synchronized(),
            )
            .pickers(self.selection.from, self.selection.till)
            .cards(self.cards())
            .panes(
                self.pane_view(PaneSlot::Left),
                self.pane_view(PaneSlot::Right),
            )
            .build()
    }

    fn selector_panel(&self, selector: Selector) -> SelectorPanel {
        let values = self.controls.values(selector);
        let disabled = selector == Selector::Secondary && self.controls.secondary_disabled();
        let mode_options = self
            .dataset
            .modes()
            .iter()
            .map(|mode| ChoiceOption {
                value: mode.clone(),
                disabled,
            })
            .collect();
        SelectorPanel {
            mode_options,
            selected_modes: values.modes.clone(),
            resolution: values.resolution,
            aggregation: values.aggregation,
            enabled: !disabled,
        }
    }

    fn cards(&self) -> Vec<ComparisonCard> {
        self.registry
            .entries()
            .iter()
            .map(|entry| ComparisonCard {
                id: entry.id,
                label: entry.label(),
                modes: entry.modes.clone(),
                overview: entry.overview.clone(),
                day_types: entry.day_types.clone(),
                checked: self.pinning.is_checked(entry.id),
                check_disabled: self.pinning.check_disabled(entry.id),
            })
            .collect()
    }

    fn pane_view(&self, slot: PaneSlot) -> PaneView {
        let Some(id) = self.pinning.slot(slot) else {
            return PaneView::Placeholder;
        };
        let series = match slot {
            PaneSlot::Left => self.left_pane_series.clone(),
            PaneSlot::Right => self.right_pane_series.clone(),
        }
        .unwrap_or_default();
        let label = self
            .registry
            .get(id)
            .map(|entry| entry.label())
            .unwrap_or_default();
        PaneView::Pinned { id, label, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Weekday};
    use ridelens_core::{DayType, RidershipRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_type_for(d: NaiveDate) -> DayType {
        match d.weekday() {
            Weekday::Sat => DayType::SaturdayHoliday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    /// Two months of synthetic data with constant counts per day.
    fn sample_dataset() -> Arc<Dataset> {
        let mut records = Vec::new();
        let mut d = date(2022, 3, 1);
        while d <= date(2022, 4, 30) {
            records.push(RidershipRecord::new(d, day_type_for(d), vec![100, 40]));
            d = d.succ_opt().unwrap();
        }
        Arc::new(Dataset::new(
            vec!["bus".to_string(), "rail".to_string()],
            records,
        ))
    }

    fn session() -> SessionState {
        SessionState::new(sample_dataset(), &Config::default())
    }

    #[test]
    fn test_new_session_renders_overview() {
        let session = session();
        assert!(!session.overview_series().is_empty());
        assert!(session.zoomed_series().is_empty());
        assert_eq!(session.overview_series().modes(), ["bus", "rail"]);
    }

    #[test]
    fn test_empty_mode_selection_keeps_prior_chart() {
        let mut session = session();
        let before = session.overview_series().clone();

        session.handle(AppEvent::set_modes(Selector::Primary, Vec::<String>::new()));

        // The selector shows the new (empty) choice, the chart does not go blank
        assert!(session.controls.primary.modes.is_empty());
        assert_eq!(session.overview_series(), &before);
    }

    #[test]
    fn test_brush_populates_selection_charts() {
        let mut session = session();
        session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));

        assert!(session.selection.is_active());
        assert!(!session.zoomed_series().is_empty());
        assert!(!session.weekday_series().is_empty());
        assert!(!session.other_series().is_empty());

        session.handle(AppEvent::clear_range());
        assert!(session.zoomed_series().is_empty());
    }

    #[test]
    fn test_save_without_selection_is_noop() {
        let mut session = session();
        session.handle(AppEvent::save_timeframe());
        assert!(session.registry.is_empty());
    }

    #[test]
    fn test_save_captures_secondary_modes() {
        let mut session = session();
        session.handle(AppEvent::toggle_synchronize(false));
        session.handle(AppEvent::set_modes(Selector::Secondary, ["rail"]));
        session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));
        session.handle(AppEvent::save_timeframe());

        let entry = &session.registry.entries()[0];
        assert_eq!(entry.modes, vec!["rail".to_string()]);
        assert_eq!(entry.range.start, date(2022, 3, 7));
        assert!(!entry.overview.is_empty());
        assert!(!entry.day_types.weekday.is_empty());
        assert!(!entry.day_types.other.is_empty());
    }

    #[test]
    fn test_delete_clears_pinned_pane() {
        let mut session = session();
        session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));
        session.handle(AppEvent::save_timeframe());
        let id = session.registry.entries()[0].id;

        session.handle(AppEvent::toggle_check(id, true));
        assert_eq!(session.pinning.slot(PaneSlot::Left), Some(id));

        session.handle(AppEvent::delete_comparison(id));
        assert!(session.registry.is_empty());
        assert_eq!(session.pinning.slot(PaneSlot::Left), None);
        assert!(session.pinning.checked().is_empty());
        assert!(session.snapshot().left_pane.is_placeholder());
    }

    #[test]
    fn test_snapshot_disables_synced_secondary_controls() {
        let mut session = session();
        session.handle(AppEvent::toggle_synchronize(true));

        let snapshot = session.snapshot();
        assert!(!snapshot.secondary_controls.enabled);
        assert!(snapshot.secondary_controls.mode_options.iter().all(|o| o.disabled));
        assert!(snapshot.primary_controls.enabled);
    }

    #[test]
    fn test_process_drains_bus() {
        let mut session = session();
        let mut bus = EventBus::new();
        bus.emit(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));
        bus.emit(AppEvent::save_timeframe());

        session.process(&mut bus);

        assert!(!bus.has_events());
        assert!(bus.has_commands());
        assert_eq!(session.registry.len(), 1);
    }
}

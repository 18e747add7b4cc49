//! Integration tests for the dashboard session.
//!
//! These drive a [`SessionState`] through the same typed events the
//! presentation layer would emit and check the derived series, region
//! visibility and comparison state after each turn.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use ridelens::{
    AppEvent, Command, EntryId, PaneSlot, PaneView, Region, Selector, SessionState,
};
use ridelens_config::Config;
use ridelens_core::{Aggregation, Dataset, DayType, Resolution, RidershipRecord};

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

/// One record per day with counts chosen by the callback.
fn dataset_over(
    start: NaiveDate,
    end: NaiveDate,
    counts: impl Fn(NaiveDate) -> Vec<u64>,
) -> Arc<Dataset> {
    let mut records = Vec::new();
    let mut d = start;
    while d <= end {
        records.push(RidershipRecord::new(d, day_type_for(d), counts(d)));
        d = d.succ_opt().unwrap();
    }
    Arc::new(Dataset::new(
        vec!["bus".to_string(), "rail".to_string()],
        records,
    ))
}

/// Spring 2022 dataset with day-type dependent bus counts.
fn city_dataset() -> Arc<Dataset> {
    dataset_over(date(2022, 3, 1), date(2022, 5, 31), |d| {
        let bus = match day_type_for(d) {
            DayType::Weekday => 100,
            DayType::SaturdayHoliday => 60,
            DayType::Sunday => 30,
        };
        vec![bus, 50]
    })
}

fn city_session() -> SessionState {
    SessionState::new(city_dataset(), &Config::default())
}

/// Whether a command (or any command in its batches) redraws a region.
fn redraws(cmd: &Command, region: Region) -> bool {
    match cmd {
        Command::Redraw(r) => *r == region,
        Command::Batch(cmds) => cmds.iter().any(|c| redraws(c, region)),
        _ => false,
    }
}

/// Whether a command (or any command in its batches) redraws a pane.
fn redraws_pane(cmd: &Command, slot: PaneSlot) -> bool {
    match cmd {
        Command::RedrawPane(s) => *s == slot,
        Command::Batch(cmds) => cmds.iter().any(|c| redraws_pane(c, slot)),
        _ => false,
    }
}

/// A 24-year dataset aggregated monthly yields one bucket per calendar
/// month, each holding that month's per-mode sum.
#[test]
fn test_monthly_sum_produces_one_bucket_per_month() {
    let dataset = dataset_over(date(2001, 1, 1), date(2024, 12, 31), |_| vec![2, 3]);
    assert_eq!(dataset.len(), 8766);

    let config = Config::default();
    let mut session = SessionState::new(dataset, &config);
    session.handle(AppEvent::set_resolution(Selector::Primary, Resolution::Monthly));
    session.handle(AppEvent::set_aggregation(Selector::Primary, Aggregation::Sum));

    let series = session.overview_series();
    assert_eq!(series.modes(), ["bus", "rail"]);
    assert_eq!(series.len(), 24 * 12);

    let mut prev: Option<NaiveDate> = None;
    for point in series.points() {
        if let Some(p) = prev {
            assert!(point.date > p, "bucket dates must be strictly increasing");
        }
        prev = Some(point.date);

        // Full coverage, so every bucket is labeled with its month's last day
        let days = f64::from(point.date.day());
        assert_eq!(point.values, vec![days * 2.0, days * 3.0]);
    }

    assert_eq!(series.first_date(), Some(date(2001, 1, 31)));
    assert_eq!(series.last_date(), Some(date(2024, 12, 31)));
}

/// Brush, save, pin and delete in one sitting.
#[test]
fn test_full_user_journey() {
    let mut session = city_session();

    // Nothing selected yet: dependent regions hidden, overview drawn
    let snapshot = session.snapshot();
    assert!(!snapshot.visibility.zoomed);
    assert!(!snapshot.visibility.day_types);
    assert!(!snapshot.visibility.detail_row);
    assert!(!snapshot.overview.is_empty());

    // Brush two weeks on the overview chart
    let cmd = session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));
    assert!(redraws(&cmd, Region::Zoomed));
    assert!(redraws(&cmd, Region::DayTypes));

    let snapshot = session.snapshot();
    assert!(snapshot.visibility.zoomed);
    assert!(snapshot.visibility.detail_row);
    assert_eq!(snapshot.from, Some(date(2022, 3, 7)));
    assert_eq!(snapshot.till, Some(date(2022, 3, 20)));

    // Save the selection as a comparison entry
    session.handle(AppEvent::save_timeframe());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.cards.len(), 1);
    let card = &snapshot.cards[0];
    assert_eq!(card.label, "2022-03-07 to 2022-03-20");
    // Daily previews: 14 days overall, 10 weekdays and 4 weekend days
    assert_eq!(card.overview.len(), 14);
    assert_eq!(card.day_types.weekday.len(), 10);
    assert_eq!(card.day_types.other.len(), 4);
    assert!(!card.checked);

    // Pin it; the left pane fills first
    let id = card.id;
    let cmd = session.handle(AppEvent::toggle_check(id, true));
    assert!(redraws_pane(&cmd, PaneSlot::Left));

    let snapshot = session.snapshot();
    match &snapshot.left_pane {
        PaneView::Pinned { id: pinned, series, .. } => {
            assert_eq!(*pinned, id);
            assert_eq!(series.len(), 14);
        }
        other => panic!("expected a pinned left pane, got {other:?}"),
    }
    assert!(snapshot.right_pane.is_placeholder());
    assert!(snapshot.cards[0].checked);

    // Save a second range through the date pickers and pin it
    session.handle(AppEvent::edit_pickers(
        Some(date(2022, 4, 4)),
        Some(date(2022, 4, 10)),
    ));
    session.handle(AppEvent::save_timeframe());
    let second = session.snapshot().cards[1].id;
    session.handle(AppEvent::toggle_check(second, true));
    assert!(!session.snapshot().right_pane.is_placeholder());

    // Deleting the left-pinned entry frees only its pane
    let cmd = session.handle(AppEvent::delete_comparison(id));
    assert!(redraws_pane(&cmd, PaneSlot::Left));
    assert!(!redraws_pane(&cmd, PaneSlot::Right));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.cards.len(), 1);
    assert!(snapshot.left_pane.is_placeholder());
    match &snapshot.right_pane {
        PaneView::Pinned { id: pinned, .. } => assert_eq!(*pinned, second),
        other => panic!("expected the right pane to stay pinned, got {other:?}"),
    }
}

/// Checking a third entry is rejected while both panes are taken.
#[test]
fn test_pinning_cap_and_unpin_flow() {
    let mut session = city_session();

    // Save three entries over different weeks
    for week in 0..3 {
        let start = date(2022, 3, 7) + chrono::Days::new(week * 7);
        let end = start + chrono::Days::new(6);
        session.handle(AppEvent::brush(start, end));
        session.handle(AppEvent::save_timeframe());
    }
    let ids: Vec<_> = session.snapshot().cards.iter().map(|c| c.id).collect();
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    session.handle(AppEvent::toggle_check(a, true));
    session.handle(AppEvent::toggle_check(b, true));
    session.handle(AppEvent::toggle_check(c, true));

    assert_eq!(session.pinning.slot(PaneSlot::Left), Some(a));
    assert_eq!(session.pinning.slot(PaneSlot::Right), Some(b));
    assert_eq!(session.pinning.checked(), &[a, b]);

    // The third card's checkbox is rendered disabled
    let snapshot = session.snapshot();
    assert!(snapshot.cards[2].check_disabled);
    assert!(!snapshot.cards[0].check_disabled);

    // Unchecking the left entry restores its placeholder, right untouched
    session.handle(AppEvent::toggle_check(a, false));
    let snapshot = session.snapshot();
    assert!(snapshot.left_pane.is_placeholder());
    assert!(!snapshot.right_pane.is_placeholder());
    assert!(!snapshot.cards[2].check_disabled);

    // The freed slot accepts the third entry now
    session.handle(AppEvent::toggle_check(c, true));
    assert_eq!(session.pinning.slot(PaneSlot::Left), Some(c));
}

/// Enabling synchronize copies the primary triple onto the secondary
/// selectors and disables them; disabling re-enables without snapback.
#[test]
fn test_synchronize_propagation() {
    let mut config = Config::default();
    config.controls.synchronize = false;
    let mut session = SessionState::new(city_dataset(), &config);

    session.handle(AppEvent::set_modes(Selector::Primary, ["bus"]));
    session.handle(AppEvent::set_resolution(Selector::Primary, Resolution::Weekly));
    session.handle(AppEvent::set_aggregation(Selector::Primary, Aggregation::Mean));
    session.handle(AppEvent::set_modes(Selector::Secondary, ["rail"]));

    session.handle(AppEvent::toggle_synchronize(true));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.secondary_controls.selected_modes, vec!["bus".to_string()]);
    assert_eq!(snapshot.secondary_controls.resolution, Resolution::Weekly);
    assert_eq!(snapshot.secondary_controls.aggregation, Aggregation::Mean);
    assert!(!snapshot.secondary_controls.enabled);

    session.handle(AppEvent::toggle_synchronize(false));
    let snapshot = session.snapshot();
    assert!(snapshot.secondary_controls.enabled);
    assert_eq!(snapshot.secondary_controls.selected_modes, vec!["bus".to_string()]);
}

/// The day-type split renders daily values for the secondary modes,
/// regardless of the secondary resolution driving the zoomed chart.
#[test]
fn test_day_type_split_follows_secondary_modes() {
    let mut config = Config::default();
    config.controls.synchronize = false;
    let mut session = SessionState::new(city_dataset(), &config);

    session.handle(AppEvent::set_modes(Selector::Secondary, ["bus"]));
    session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 13)));

    // One calendar week selected: the zoomed chart buckets it weekly
    // (the secondary default), the split stays daily
    assert_eq!(session.zoomed_series().len(), 1);

    let weekday = session.weekday_series();
    assert_eq!(weekday.modes(), ["bus"]);
    assert_eq!(weekday.len(), 5);
    assert!(weekday.points().iter().all(|p| p.values == [100.0]));

    let other = session.other_series();
    assert_eq!(other.len(), 2);
    assert_eq!(other.points()[0].values, [60.0]); // Saturday
    assert_eq!(other.points()[1].values, [30.0]); // Sunday
}

/// A selector value with no matching dataset column leaves the previous
/// chart in place instead of blanking it.
#[test]
fn test_unknown_mode_keeps_prior_chart() {
    let mut session = city_session();
    let before = session.overview_series().clone();

    session.handle(AppEvent::set_modes(Selector::Primary, ["ferry"]));

    assert_eq!(session.overview_series(), &before);
    assert_eq!(session.controls.primary.modes, vec!["ferry".to_string()]);
}

/// Stale ids and half-filled pickers are benign no-ops.
#[test]
fn test_stale_and_partial_events_are_benign() {
    let mut session = city_session();

    // Half-filled pickers leave every dependent region hidden
    session.handle(AppEvent::edit_pickers(Some(date(2022, 3, 7)), None));
    assert!(!session.snapshot().visibility.zoomed);
    assert!(session.zoomed_series().is_empty());

    // Events referencing ids that were never issued change nothing
    session.handle(AppEvent::toggle_check(EntryId(42), true));
    session.handle(AppEvent::delete_comparison(EntryId(42)));
    assert!(session.registry.is_empty());
    assert!(session.pinning.checked().is_empty());

    // A duplicate delete after a real one is equally harmless
    session.handle(AppEvent::brush(date(2022, 3, 7), date(2022, 3, 20)));
    session.handle(AppEvent::save_timeframe());
    let id = session.snapshot().cards[0].id;
    session.handle(AppEvent::delete_comparison(id));
    session.handle(AppEvent::delete_comparison(id));
    assert!(session.registry.is_empty());
}

//! Date-range selection shared by the zoomed and day-type views.

use chrono::NaiveDate;

use ridelens_core::DateRange;

/// Current date-picker values and the effective selection they form.
///
/// A brush on the overview chart writes both pickers; from then on the
/// pickers are the source of truth for further edits. The selection only
/// takes effect once both pickers hold a date in order. Anything less, a
/// half-filled pair included, counts as "no selection" and the dependent
/// regions stay hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub from: Option<NaiveDate>,
    pub till: Option<NaiveDate>,
}

impl SelectionState {
    /// Create a state with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a brush selection, filling both pickers.
    ///
    /// A right-to-left drag delivers its endpoints reversed; they are
    /// normalized here.
    pub fn brush(&mut self, start: NaiveDate, end: NaiveDate) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.from = Some(start);
        self.till = Some(end);
    }

    /// Apply a picker edit, replacing both picker values.
    pub fn set_pickers(&mut self, from: Option<NaiveDate>, till: Option<NaiveDate>) {
        self.from = from;
        self.till = till;
    }

    /// Dismiss the current selection.
    pub fn clear(&mut self) {
        self.from = None;
        self.till = None;
    }

    /// The selected range, once both pickers are set in order.
    ///
    /// An inverted pair (from after till) is treated as incomplete rather
    /// than as an error; the user is mid-edit.
    #[must_use]
    pub fn effective_range(&self) -> Option<DateRange> {
        match (self.from, self.till) {
            (Some(from), Some(till)) if from <= till => Some(DateRange::new(from, till)),
            _ => None,
        }
    }

    /// Whether a usable selection currently exists.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.effective_range().is_some()
    }
}

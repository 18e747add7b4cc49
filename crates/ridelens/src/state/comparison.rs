//! Saved timeframe registry backing the comparison panel.
//!
//! Every "save timeframe" click appends a [`ComparisonEntry`] here. Entries
//! are identified by [`EntryId`] and listed in insertion order; deleting one
//! never renumbers the others.

use std::fmt;

use ridelens_core::{DateRange, Series};

use crate::state::snapshot::DayTypeSplit;

/// Unique identifier for a saved comparison entry.
///
/// Ids count saves since session start and are never reused, so after
/// deletions the live ids are not necessarily contiguous. A stale id from a
/// duplicate or late delete event simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One saved timeframe, rendered as a small preview card.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    /// Sequence id, unique for the life of the session.
    pub id: EntryId,
    /// The saved date range, inclusive on both ends.
    pub range: DateRange,
    /// Modes captured from the secondary selectors at save time.
    pub modes: Vec<String>,
    /// Daily preview over the saved range, all day types.
    pub overview: Series,
    /// Daily preview split by day type.
    pub day_types: DayTypeSplit,
}

impl ComparisonEntry {
    /// Card header label, e.g. `2015-01-01 to 2015-06-30`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} to {}", self.range.start, self.range.end)
    }
}

/// Ordered collection of saved timeframes.
///
/// The registry owns its entries; the pinning controller refers to them by
/// id only and is resynchronized after every removal.
#[derive(Debug, Default)]
pub struct ComparisonRegistry {
    entries: Vec<ComparisonEntry>,
    /// Total saves since session start, used for id assignment.
    saved: u64,
}

impl ComparisonRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and return its assigned id.
    ///
    /// Ids advance on every save, including saves later deleted.
    pub fn save(
        &mut self,
        range: DateRange,
        modes: Vec<String>,
        overview: Series,
        day_types: DayTypeSplit,
    ) -> EntryId {
        self.saved += 1;
        let id = EntryId(self.saved);
        self.entries.push(ComparisonEntry {
            id,
            range,
            modes,
            overview,
            day_types,
        });
        id
    }

    /// Remove the entry with the given id.
    ///
    /// Removing an id that is not present is a no-op; duplicate delete
    /// events are tolerated. Returns whether an entry was removed.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check whether an entry with the given id exists.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    /// Ids of all live entries in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Close-comparison pinning state machine.
//!
//! Comparison cards carry a checkbox; checking one pins its entry into one
//! of the two large close-comparison panes. This module tracks slot
//! assignment and the check order that drives it.

use crate::state::comparison::EntryId;

/// The two close-comparison display slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneSlot {
    Left,
    Right,
}

impl PaneSlot {
    /// Get a human-readable name for this slot.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PaneSlot::Left => "left",
            PaneSlot::Right => "right",
        }
    }
}

/// Tracks which comparison entries are pinned into the two panes.
///
/// At most two entries are pinned at a time. The first checked entry fills
/// the left pane, the second the right; unchecking frees only the slot that
/// entry held, leaving the other pane untouched.
#[derive(Debug, Clone, Default)]
pub struct PinningState {
    left: Option<EntryId>,
    right: Option<EntryId>,
    /// Checked ids in the order they were checked.
    checked: Vec<EntryId>,
}

impl PinningState {
    /// Create a state with nothing pinned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a check event.
    ///
    /// Returns the slot the entry was assigned, or `None` if the event was
    /// ignored. Duplicate checks are ignored, and so is a check arriving
    /// while both slots are taken: the checkbox is rendered disabled in
    /// that situation, so such an event is stale and must not assign a
    /// third slot.
    pub fn check(&mut self, id: EntryId) -> Option<PaneSlot> {
        if self.checked.contains(&id) {
            return None;
        }
        let slot = if self.left.is_none() {
            self.left = Some(id);
            PaneSlot::Left
        } else if self.right.is_none() {
            self.right = Some(id);
            PaneSlot::Right
        } else {
            return None;
        };
        self.checked.push(id);
        Some(slot)
    }

    /// Handle an uncheck event.
    ///
    /// Clears only the slot the entry held and returns it; unchecking an
    /// id that holds no slot is a no-op.
    pub fn uncheck(&mut self, id: EntryId) -> Option<PaneSlot> {
        self.checked.retain(|c| *c != id);
        if self.left == Some(id) {
            self.left = None;
            Some(PaneSlot::Left)
        } else if self.right == Some(id) {
            self.right = None;
            Some(PaneSlot::Right)
        } else {
            None
        }
    }

    /// Drop any state referring to ids that no longer exist.
    ///
    /// Recovery path for deletions and external resets: the checked list
    /// is rebuilt from the surviving ids and each slot keeps its
    /// assignment as long as its entry still exists. Returns the slots
    /// that were cleared.
    pub fn resync(&mut self, exists: impl Fn(EntryId) -> bool) -> Vec<PaneSlot> {
        self.checked.retain(|id| exists(*id));
        let mut freed = Vec::new();
        if let Some(id) = self.left {
            if !exists(id) {
                self.left = None;
                freed.push(PaneSlot::Left);
            }
        }
        if let Some(id) = self.right {
            if !exists(id) {
                self.right = None;
                freed.push(PaneSlot::Right);
            }
        }
        freed
    }

    /// The entry pinned in the given slot, if any.
    #[must_use]
    pub fn slot(&self, slot: PaneSlot) -> Option<EntryId> {
        match slot {
            PaneSlot::Left => self.left,
            PaneSlot::Right => self.right,
        }
    }

    /// Checked ids in check order.
    #[must_use]
    pub fn checked(&self) -> &[EntryId] {
        &self.checked
    }

    /// Check whether an entry is currently checked.
    #[must_use]
    pub fn is_checked(&self, id: EntryId) -> bool {
        self.checked.contains(&id)
    }

    /// Check whether both panes are taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Number of pinned entries.
    #[must_use]
    pub fn pinned_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Whether the pin checkbox for this entry should be rendered disabled.
    ///
    /// Once both panes are taken, only the two pinned entries keep a live
    /// checkbox (so they can be unchecked).
    #[must_use]
    pub fn check_disabled(&self, id: EntryId) -> bool {
        self.is_full() && !self.is_checked(id)
    }
}

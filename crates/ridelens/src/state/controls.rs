//! Selector control state for the two chart control sets.
//!
//! The primary set drives the overview chart; the secondary set drives the
//! zoomed and day-type charts. While the "synchronize" toggle is on the
//! secondary set mirrors the primary and its widgets are disabled.

use ridelens_core::{Aggregation, Resolution};

use crate::events::Selector;

/// Current values of one selector set.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorValues {
    pub modes: Vec<String>,
    pub resolution: Resolution,
    pub aggregation: Aggregation,
}

impl SelectorValues {
    pub fn new(
        modes: Vec<String>,
        resolution: Resolution,
        aggregation: Aggregation,
    ) -> Self {
        Self {
            modes,
            resolution,
            aggregation,
        }
    }
}

/// Both selector sets plus the synchronize toggle.
#[derive(Debug, Clone)]
pub struct ControlsState {
    pub primary: SelectorValues,
    pub secondary: SelectorValues,
    synchronize: bool,
}

impl ControlsState {
    /// Start both selector sets from the same defaults.
    #[must_use]
    pub fn new(defaults: SelectorValues, synchronize: bool) -> Self {
        Self {
            secondary: defaults.clone(),
            primary: defaults,
            synchronize,
        }
    }

    /// Whether the secondary set currently mirrors the primary.
    #[must_use]
    pub fn synchronized(&self) -> bool {
        self.synchronize
    }

    /// Whether the secondary widgets should be rendered disabled.
    #[must_use]
    pub fn secondary_disabled(&self) -> bool {
        self.synchronize
    }

    /// Enable or disable synchronization.
    ///
    /// Enabling copies the current primary values over the secondary set.
    /// Disabling re-enables the secondary widgets without touching their
    /// values (no snapback). Returns whether anything changed.
    pub fn set_synchronize(&mut self, enabled: bool) -> bool {
        if self.synchronize == enabled {
            return false;
        }
        self.synchronize = enabled;
        if enabled {
            self.secondary = self.primary.clone();
        }
        true
    }

    /// Apply a mode change to one selector set.
    ///
    /// Returns whether the edit was applied. Secondary edits are dropped
    /// while synchronization is on: those widgets are disabled, so any
    /// arriving event is stale.
    pub fn set_modes(&mut self, selector: Selector, modes: Vec<String>) -> bool {
        match selector {
            Selector::Primary => {
                self.primary.modes = modes;
                if self.synchronize {
                    self.secondary.modes = self.primary.modes.clone();
                }
                true
            }
            Selector::Secondary => {
                if self.synchronize {
                    return false;
                }
                self.secondary.modes = modes;
                true
            }
        }
    }

    /// Apply a resolution change to one selector set.
    pub fn set_resolution(&mut self, selector: Selector, resolution: Resolution) -> bool {
        match selector {
            Selector::Primary => {
                self.primary.resolution = resolution;
                if self.synchronize {
                    self.secondary.resolution = resolution;
                }
                true
            }
            Selector::Secondary => {
                if self.synchronize {
                    return false;
                }
                self.secondary.resolution = resolution;
                true
            }
        }
    }

    /// Apply an aggregation change to one selector set.
    pub fn set_aggregation(&mut self, selector: Selector, aggregation: Aggregation) -> bool {
        match selector {
            Selector::Primary => {
                self.primary.aggregation = aggregation;
                if self.synchronize {
                    self.secondary.aggregation = aggregation;
                }
                true
            }
            Selector::Secondary => {
                if self.synchronize {
                    return false;
                }
                self.secondary.aggregation = aggregation;
                true
            }
        }
    }

    /// The values currently backing one selector set.
    #[must_use]
    pub fn values(&self, selector: Selector) -> &SelectorValues {
        match selector {
            Selector::Primary => &self.primary,
            Selector::Secondary => &self.secondary,
        }
    }
}

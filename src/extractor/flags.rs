//! Relaxable extraction filters.
//!
//! Three independent filters start enabled and are switched off one at a time
//! when an attempt comes back too short. A filter, once off, stays off for the
//! rest of the extraction call.

use serde::Serialize;

/// One of the relaxable filters, listed in the order they are relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Filter {
    /// Drop nodes whose class/id reads like navigation, ads or sidebars.
    StripUnlikelys,
    /// Add the class/id weight to initial node scores.
    WeightClasses,
    /// Prune suspicious lists, tables and forms from the assembled content.
    CleanConditionally,
}

impl Filter {
    /// Relaxation order.
    pub const PRIORITY: [Filter; 3] = [
        Filter::StripUnlikelys,
        Filter::WeightClasses,
        Filter::CleanConditionally,
    ];

    const fn bit(self) -> u8 {
        match self {
            Filter::StripUnlikelys => 0b001,
            Filter::WeightClasses => 0b010,
            Filter::CleanConditionally => 0b100,
        }
    }
}

/// Bitset of enabled filters. Bits only ever go from set to cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterFlags(u8);

impl Default for FilterFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl FilterFlags {
    pub const ALL: FilterFlags = FilterFlags(0b111);
    pub const NONE: FilterFlags = FilterFlags(0);

    #[must_use]
    pub fn is_enabled(self, filter: Filter) -> bool {
        self.0 & filter.bit() != 0
    }

    /// Turn a filter off. Turning it off twice is a no-op.
    pub fn disable(&mut self, filter: Filter) {
        self.0 &= !filter.bit();
    }

    /// Turn off the highest-priority filter still on and report which one.
    ///
    /// Returns `None` once every filter is off.
    pub fn relax(&mut self) -> Option<Filter> {
        let next = Filter::PRIORITY
            .into_iter()
            .find(|&f| self.is_enabled(f))?;
        self.disable(next);
        Some(next)
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

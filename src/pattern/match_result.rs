// Fri Jan 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single pattern search. `offset` is -1 when nothing was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternScanResult {
    pub found: bool,
    pub offset: i32,
}

impl PatternScanResult {
    pub const NOT_FOUND: Self = Self {
        found: false,
        offset: -1,
    };

    /// Offsets always fit: regions longer than `i32::MAX` are rejected when a
    /// scanner is built.
    pub fn found(offset: usize) -> Self {
        debug_assert!(offset <= i32::MAX as usize);
        Self {
            found: true,
            offset: offset as i32,
        }
    }

    /// Rebases a result from a sub-range starting at `start` onto the full region.
    pub fn add_offset(self, start: usize) -> Self {
        if self.found {
            Self::found(self.offset as usize + start)
        } else {
            self
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.found.then_some(self.offset as usize)
    }
}

impl Default for PatternScanResult {
    fn default() -> Self {
        Self::NOT_FOUND
    }
}

impl From<Option<usize>> for PatternScanResult {
    fn from(offset: Option<usize>) -> Self {
        offset.map_or(Self::NOT_FOUND, Self::found)
    }
}

impl fmt::Display for PatternScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(f, "found at 0x{:X}", self.offset)
        } else {
            write!(f, "not found")
        }
    }
}

//! Wheel segment layout and landing resolution

use crate::consts::*;
use crate::normalize_degrees;

/// Payout multipliers, clockwise from the segment under the pointer at rest
pub const MULTIPLIERS: [u32; SEGMENT_COUNT] = [2, 0, 1, 0, 5, 0, 1, 0, 2, 0, 10, 0, 2, 0, 1, 0, 5, 0, 1, 0];

/// Immutable multiplier table mapped cyclically onto 360 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTable {
    multipliers: [u32; SEGMENT_COUNT],
}

impl Default for SegmentTable {
    fn default() -> Self {
        Self::new(MULTIPLIERS)
    }
}

impl SegmentTable {
    pub fn new(multipliers: [u32; SEGMENT_COUNT]) -> Self {
        Self { multipliers }
    }

    /// Segment index the pointer lands on for a resting rotation.
    ///
    /// `floor((angle mod 360 + offset) / 18) mod 20`; the trailing modulo folds
    /// the sliver just below 360 degrees back onto segment 0.
    pub fn landing_index(&self, rotation_deg: f64) -> usize {
        let rest = normalize_degrees(rotation_deg);
        let raw = ((rest + LANDING_OFFSET_DEG) / SEGMENT_DEG).floor() as usize;
        raw % SEGMENT_COUNT
    }

    pub fn multiplier(&self, index: usize) -> u32 {
        self.multipliers[index % SEGMENT_COUNT]
    }

    /// Multiplier for a resting rotation
    pub fn resolve(&self, rotation_deg: f64) -> (usize, u32) {
        let index = self.landing_index(rotation_deg);
        (index, self.multiplier(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.multipliers.iter().copied()
    }
}

//! Nearest reversal point detection.
//!
//! Walks backward from the most recent sample in fixed `hop` sized jumps.
//! The walk first follows the trend in the direction's own sense
//! (confirmation), then flips and follows it in the opposite sense
//! (refinement). The sample held when refinement stops is the turning point.
//!
//! This finds the *nearest* reversal, not the global extremum of the series.
//! The confirmation phase can also move past the most recent sample before
//! refinement starts, so the latest price is not always a candidate.

use crate::types::{Annotation, Direction, ExtremumResult, Sample, TimeSeries};

/// Scanner for one hop size and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremumScanner {
    hop: usize,
    direction: Direction,
}

impl ExtremumScanner {
    pub fn new(hop: usize, direction: Direction) -> Self {
        Self { hop, direction }
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Locate the nearest turning point behind the latest sample.
    ///
    /// Never fails; edge cases come back as annotated results.
    pub fn scan(&self, series: &TimeSeries) -> ExtremumResult {
        let (hop, direction) = (self.hop, self.direction);

        if hop == 0 {
            return ExtremumResult::empty(direction, hop, Annotation::InvalidHop);
        }

        let samples = series.samples();
        let Some(latest) = samples.last() else {
            return ExtremumResult::empty(direction, hop, Annotation::NotEnoughData);
        };

        let cursor = samples.len() - 1;
        if cursor < hop {
            return ExtremumResult::at(direction, hop, latest, Annotation::NotEnoughData);
        }

        let mut index = cursor - hop;
        let mut anchor: &Sample = latest;
        let mut earlier: &Sample = &samples[index];

        // Confirmation: follow the trend in the direction's own sense
        while direction.follows(anchor.price, earlier.price) {
            anchor = earlier;
            if index == 0 {
                return ExtremumResult::at(direction, hop, latest, Annotation::NoExtremumCurrently);
            }
            index = index.saturating_sub(hop);
            earlier = &samples[index];
        }

        // Refinement: follow it in the opposite sense until it turns
        while direction.opposes(anchor.price, earlier.price) {
            anchor = earlier;
            if index == 0 {
                return ExtremumResult::at(direction, hop, earlier, Annotation::OpenedAtBound);
            }
            index = index.saturating_sub(hop);
            earlier = &samples[index];
        }

        ExtremumResult::at(direction, hop, anchor, Annotation::Found)
    }
}

/// Scan `series` for the nearest `direction` turning point using `hop`.
pub fn scan(series: &TimeSeries, hop: usize, direction: Direction) -> ExtremumResult {
    ExtremumScanner::new(hop, direction).scan(series)
}

use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use super::series::{zero_time, Sample};

/// Which kind of turning point a scan is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    Minima,
    Maxima,
}

impl Direction {
    /// Both directions, in the order results are reported.
    pub const ALL: [Direction; 2] = [Direction::Minima, Direction::Maxima];

    /// True when `held` should give way to `earlier` while walking back
    /// through a trend in this direction's own sense.
    ///
    /// For minima the past is at least as high; for maxima at least as low.
    pub fn follows(&self, held: f64, earlier: f64) -> bool {
        match self {
            Direction::Minima => held <= earlier,
            Direction::Maxima => held >= earlier,
        }
    }

    /// The comparison with its sense flipped.
    pub fn opposes(&self, held: f64, earlier: f64) -> bool {
        match self {
            Direction::Minima => held >= earlier,
            Direction::Maxima => held <= earlier,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Direction::Minima => "minima",
            Direction::Maxima => "maxima",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minima => write!(f, "Minima"),
            Direction::Maxima => write!(f, "Maxima"),
        }
    }
}

/// Outcome tag attached to every scan result. Edge cases are reported here
/// instead of as errors, so a result is always structurally complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Annotation {
    /// A reversal point was found.
    #[default]
    Found,
    /// Hop size was zero.
    InvalidHop,
    /// Fewer than `hop` samples precede the most recent one.
    NotEnoughData,
    /// The series ran out before the trend ever turned.
    NoExtremumCurrently,
    /// The series ran out while still refining; the earliest sample wins.
    OpenedAtBound,
}

impl Annotation {
    /// Human readable message for a given direction. Empty on success.
    pub fn message(&self, direction: Direction) -> String {
        match self {
            Annotation::Found => String::new(),
            Annotation::InvalidHop => "invalid slot value".to_string(),
            Annotation::NotEnoughData => "Not enough data".to_string(),
            Annotation::NoExtremumCurrently => {
                format!("No {} is obtained currently", direction.noun())
            }
            Annotation::OpenedAtBound => match direction {
                Direction::Minima => "Opened at lowest".to_string(),
                Direction::Maxima => "Opened at Highest".to_string(),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Annotation::Found)
    }
}

/// A located turning point for one hop and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumResult {
    pub direction: Direction,
    pub hop: usize,
    pub time: DateTime<FixedOffset>,
    pub price: f64,
    pub annotation: Annotation,
}

impl ExtremumResult {
    /// Result taken from a sample.
    pub fn at(direction: Direction, hop: usize, sample: &Sample, annotation: Annotation) -> Self {
        Self {
            direction,
            hop,
            time: sample.time,
            price: sample.price,
            annotation,
        }
    }

    /// Result with no sample behind it: zero time and zero price.
    pub fn empty(direction: Direction, hop: usize, annotation: Annotation) -> Self {
        Self {
            direction,
            hop,
            time: zero_time(),
            price: 0.0,
            annotation,
        }
    }

    pub fn message(&self) -> String {
        self.annotation.message(self.direction)
    }
}

impl Serialize for ExtremumResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExtremumResult", 5)?;
        state.serialize_field("type", &self.direction)?;
        state.serialize_field("interval", &self.hop)?;
        state.serialize_field("time", &self.time)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

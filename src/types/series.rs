use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Offset of Indian Standard Time from UTC, in seconds (+05:30, no DST).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Indian Standard Time, the zone the exchange reports in.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within a day")
}

/// Convert an epoch timestamp in milliseconds to IST.
///
/// Timestamps chrono cannot represent fall back to [`zero_time`].
pub fn epoch_ms_to_time(ms: i64) -> DateTime<FixedOffset> {
    match ist().timestamp_millis_opt(ms).single() {
        Some(time) => time,
        None => {
            warn!("Timestamp {} ms is out of range, using epoch", ms);
            zero_time()
        }
    }
}

/// The time carried by results that have no sample behind them.
pub fn zero_time() -> DateTime<FixedOffset> {
    DateTime::<Utc>::default().with_timezone(&ist())
}

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: DateTime<FixedOffset>,
    pub price: f64,
}

impl Sample {
    pub fn new(time: DateTime<FixedOffset>, price: f64) -> Self {
        Self { time, price }
    }

    /// Build a sample from an epoch millisecond timestamp.
    pub fn from_epoch_ms(ms: i64, price: f64) -> Self {
        Self {
            time: epoch_ms_to_time(ms),
            price,
        }
    }
}

/// Ordered price samples, oldest first.
///
/// Hops address the series by sample count, so the series is expected to be
/// regular enough that stepping back `n` samples is a meaningful lookback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl From<Vec<Sample>> for TimeSeries {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Descriptive data delivered alongside a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub expiry: String,
    pub commodity: String,
    pub time_range_from: DateTime<FixedOffset>,
    pub time_range_to: DateTime<FixedOffset>,
}

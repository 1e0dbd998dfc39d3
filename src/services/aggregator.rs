//! Fan-out of extremum scans across hop sizes.
//!
//! Every (hop, direction) pair is scanned as its own blocking task over a
//! shared read-only series. Results are gathered behind a single join and
//! merged by key afterwards, so completion order never shows in the output.

use crate::error::{AppError, Result};
use crate::services::scanner::scan;
use crate::types::{
    AggregateResult, Band, Direction, ExtremumResult, HopDetail, SeriesMetadata, Summary,
    TimeSeries,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// Runs both scans for every configured hop and assembles the bands.
#[derive(Debug, Clone)]
pub struct WindowAggregator {
    hops: Vec<usize>,
}

impl WindowAggregator {
    /// Duplicate hops are merged; order does not matter.
    pub fn new(hops: impl IntoIterator<Item = usize>) -> Self {
        let hops: BTreeSet<usize> = hops.into_iter().collect();
        Self {
            hops: hops.into_iter().collect(),
        }
    }

    pub fn hops(&self) -> &[usize] {
        &self.hops
    }

    /// Number of scans one aggregation runs.
    pub fn task_count(&self) -> usize {
        self.hops.len() * Direction::ALL.len()
    }

    /// Scan all hops concurrently and assemble the result once every scan
    /// has reported.
    ///
    /// Scans themselves cannot fail. An error here means a task was
    /// cancelled or panicked before reporting.
    pub async fn aggregate(
        &self,
        series: Arc<TimeSeries>,
        metadata: &SeriesMetadata,
    ) -> Result<AggregateResult> {
        let mut tasks = JoinSet::new();
        for &hop in &self.hops {
            for direction in Direction::ALL {
                let series = Arc::clone(&series);
                tasks.spawn_blocking(move || scan(&series, hop, direction));
            }
        }

        let mut results = Vec::with_capacity(self.task_count());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined?);
        }

        if results.len() != self.task_count() {
            return Err(AppError::Internal(format!(
                "expected {} scan results, got {}",
                self.task_count(),
                results.len()
            )));
        }

        debug!(
            "Joined {} scans across {} hops over {} samples",
            results.len(),
            self.hops.len(),
            series.len()
        );

        Ok(assemble(metadata, results))
    }

    /// Same result as [`aggregate`](Self::aggregate), computed on the
    /// calling thread.
    pub fn aggregate_sequential(
        &self,
        series: &TimeSeries,
        metadata: &SeriesMetadata,
    ) -> AggregateResult {
        let results = self
            .hops
            .iter()
            .flat_map(|&hop| Direction::ALL.map(|direction| scan(series, hop, direction)));
        assemble(metadata, results)
    }
}

/// Buy/sell band for a `(min, max)` pair.
pub fn band(min: f64, max: f64) -> Band {
    Band::from_range(min, max)
}

/// Merge scan results into per-hop detail and the global band.
///
/// Results are keyed by hop and direction, so input order is irrelevant.
pub fn assemble(
    metadata: &SeriesMetadata,
    results: impl IntoIterator<Item = ExtremumResult>,
) -> AggregateResult {
    let mut minima: BTreeMap<usize, ExtremumResult> = BTreeMap::new();
    let mut maxima: BTreeMap<usize, ExtremumResult> = BTreeMap::new();

    for result in results {
        match result.direction {
            Direction::Minima => minima.insert(result.hop, result),
            Direction::Maxima => maxima.insert(result.hop, result),
        };
    }

    let per_hop: BTreeMap<usize, HopDetail> = minima
        .into_iter()
        .filter_map(|(hop, low)| {
            let high = maxima.remove(&hop)?;
            Some((
                hop,
                HopDetail {
                    minima: low,
                    maxima: high,
                    band: band(low.price, high.price),
                },
            ))
        })
        .collect();

    AggregateResult {
        summary: Summary::from(metadata),
        average: global_band(&per_hop),
        per_hop,
    }
}

/// Band from the lowest minimum and the highest maximum over all hops.
/// Zero band when there are no hops.
fn global_band(per_hop: &BTreeMap<usize, HopDetail>) -> Band {
    if per_hop.is_empty() {
        return band(0.0, 0.0);
    }

    let low = per_hop
        .values()
        .map(|d| d.minima.price)
        .fold(f64::INFINITY, f64::min);
    let high = per_hop
        .values()
        .map(|d| d.maxima.price)
        .fold(f64::NEG_INFINITY, f64::max);

    band(low, high)
}

use crate::error::{AppError, Result};
use crate::services::aggregator::WindowAggregator;
use crate::sources::SeriesSource;
use crate::types::{AggregateResult, Commodity};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves a commodity, fetches its series and runs the aggregation.
pub struct AnalysisService {
    source: Arc<dyn SeriesSource>,
    aggregator: WindowAggregator,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn SeriesSource>, aggregator: WindowAggregator) -> Arc<Self> {
        Arc::new(Self { source, aggregator })
    }

    pub fn aggregator(&self) -> &WindowAggregator {
        &self.aggregator
    }

    /// Analyze today's series for a commodity name given by a client.
    pub async fn analyze(&self, name: &str) -> Result<AggregateResult> {
        let commodity =
            Commodity::lookup(name).ok_or_else(|| AppError::InvalidCommodity(name.to_string()))?;

        let (series, metadata) = self.source.fetch(commodity).await?;
        debug!(
            "Analyzing {} samples for {} across {} hops",
            series.len(),
            commodity,
            self.aggregator.hops().len()
        );

        let result = self.aggregator.aggregate(Arc::new(series), &metadata).await?;
        info!(
            "Analyzed {}: buy cap {:.2}, sell cap {:.2}",
            commodity, result.average.buy_cap, result.average.sell_cap
        );

        Ok(result)
    }
}

pub mod mcx;

pub use mcx::McxClient;

use crate::error::Result;
use crate::types::{Commodity, SeriesMetadata, TimeSeries};

/// Anything that can deliver today's price series for a commodity.
#[axum::async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, commodity: Commodity) -> Result<(TimeSeries, SeriesMetadata)>;
}

//! MCX intraday chart client.
//!
//! The exchange serves one day of intraday prices per commodity from a single
//! JSON endpoint. Timestamps are epoch milliseconds and are reported in IST.

use crate::error::{AppError, Result};
use crate::types::{epoch_ms_to_time, Commodity, Sample, SeriesMetadata, TimeSeries};
use reqwest::header::{CONTENT_TYPE, REFERER};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::SeriesSource;

#[derive(Debug, Serialize)]
struct ChartRequest<'a> {
    #[serde(rename = "Commodity")]
    commodity: &'a str,
}

#[derive(Debug, Deserialize)]
struct McxResponse {
    d: McxEnvelope,
}

#[derive(Debug, Deserialize)]
struct McxEnvelope {
    #[serde(rename = "Data")]
    data: McxChart,
}

#[derive(Debug, Deserialize)]
struct McxChart {
    #[serde(rename = "Expiry")]
    expiry: String,
    #[serde(rename = "MaxDate")]
    max_date: f64,
    #[serde(rename = "MinDate")]
    min_date: f64,
    #[serde(rename = "ScripName")]
    commodity: String,
    #[serde(rename = "IntradayGraphPlot")]
    values: Vec<McxPoint>,
}

#[derive(Debug, Deserialize)]
struct McxPoint {
    x: f64,
    y: f64,
}

/// Parse a chart response body into a series and its metadata.
///
/// A body that is not chart data becomes [`AppError::Upstream`] carrying the
/// body as generic JSON, or `null` when it is not JSON at all.
pub fn parse_chart(body: &[u8]) -> Result<(TimeSeries, SeriesMetadata)> {
    let raw: McxResponse = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Chart body did not parse: {}", e);
            let payload = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
            return Err(AppError::Upstream(payload));
        }
    };
    let chart = raw.d.data;

    let series: TimeSeries = chart
        .values
        .iter()
        .map(|p| Sample::from_epoch_ms(p.x as i64, p.y))
        .collect();

    let metadata = SeriesMetadata {
        expiry: chart.expiry,
        commodity: chart.commodity,
        time_range_from: epoch_ms_to_time(chart.min_date as i64),
        time_range_to: epoch_ms_to_time(chart.max_date as i64),
    };

    Ok((series, metadata))
}

/// Client for the exchange's chart endpoint.
pub struct McxClient {
    client: Client,
    endpoint: String,
    referer: String,
}

impl McxClient {
    pub fn new(
        endpoint: impl Into<String>,
        referer: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            referer: referer.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the raw chart body for a commodity.
    async fn fetch_body(&self, commodity: Commodity) -> Result<Vec<u8>> {
        debug!("Fetching {} chart from {}", commodity, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(REFERER, &self.referer)
            .json(&ChartRequest {
                commodity: commodity.upstream_name(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Chart request for {} failed: {}", commodity, e);
                AppError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            warn!("Chart request for {} returned {}", commodity, status);
        }

        Ok(body.to_vec())
    }
}

#[axum::async_trait]
impl SeriesSource for McxClient {
    async fn fetch(&self, commodity: Commodity) -> Result<(TimeSeries, SeriesMetadata)> {
        let body = self.fetch_body(commodity).await?;
        let (series, metadata) = parse_chart(&body)?;
        debug!("Received {} samples for {}", series.len(), commodity);
        Ok((series, metadata))
    }
}

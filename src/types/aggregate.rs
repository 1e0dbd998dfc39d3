use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::band::Band;
use super::extremum::ExtremumResult;
use super::series::SeriesMetadata;

/// Display label for a hop, e.g. `"5 minute"`.
pub fn hop_label(hop: usize) -> String {
    format!("{} minute", hop)
}

/// Metadata block echoed back with every analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "expiry_date")]
    pub expiry: String,
    pub commodity: String,
    #[serde(rename = "from")]
    pub time_range_from: DateTime<FixedOffset>,
    #[serde(rename = "to")]
    pub time_range_to: DateTime<FixedOffset>,
}

impl From<&SeriesMetadata> for Summary {
    fn from(meta: &SeriesMetadata) -> Self {
        Self {
            expiry: meta.expiry.clone(),
            commodity: meta.commodity.clone(),
            time_range_from: meta.time_range_from,
            time_range_to: meta.time_range_to,
        }
    }
}

/// Both extrema for one hop and the band between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HopDetail {
    pub minima: ExtremumResult,
    pub maxima: ExtremumResult,
    #[serde(rename = "result")]
    pub band: Band,
}

/// Full output of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub summary: Summary,
    /// Keyed by hop value; serialized keyed by [`hop_label`].
    pub per_hop: BTreeMap<usize, HopDetail>,
    /// Band across the lowest minimum and highest maximum of all hops.
    pub average: Band,
}

impl AggregateResult {
    /// Look up a hop's detail by its display label.
    pub fn by_label(&self, label: &str) -> Option<&HopDetail> {
        self.per_hop
            .iter()
            .find(|(hop, _)| hop_label(**hop) == label)
            .map(|(_, detail)| detail)
    }
}

struct Intervals<'a>(&'a BTreeMap<usize, HopDetail>);

impl Serialize for Intervals<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (hop, detail) in self.0 {
            map.serialize_entry(&hop_label(*hop), detail)?;
        }
        map.end()
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("summary", &self.summary)?;
        map.serialize_entry("average", &self.average)?;
        map.serialize_entry("intervals", &Intervals(&self.per_hop))?;
        map.end()
    }
}

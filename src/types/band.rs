use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Legend shown next to every band in API output.
pub const BAND_DESCRIPTION: &str = "Max: A ; Min: B ; SellCap: X ; BuyCap: Y";

/// Buy/sell band derived from a price range.
///
/// The caps sit a quarter of the range inside each end:
/// - `buy_cap = min + (max - min) / 4`
/// - `sell_cap = max - (max - min) / 4`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub buy_cap: f64,
    pub sell_cap: f64,
}

impl Band {
    /// Derive the band for a range. An inverted range (`max < min`) is not
    /// rejected; the quarter simply goes negative.
    pub fn from_range(min: f64, max: f64) -> Self {
        let quarter = (max - min) / 4.0;
        Self {
            min,
            max,
            buy_cap: min + quarter,
            sell_cap: max - quarter,
        }
    }

    /// Distance of each cap from its end of the range.
    pub fn quarter(&self) -> f64 {
        (self.max - self.min) / 4.0
    }
}

impl Serialize for Band {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Band", 5)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("max", &self.max)?;
        state.serialize_field("buy_cap", &self.buy_cap)?;
        state.serialize_field("sell_cap", &self.sell_cap)?;
        state.serialize_field("description", BAND_DESCRIPTION)?;
        state.end()
    }
}

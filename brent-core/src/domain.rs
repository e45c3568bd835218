//! Domain types mirroring the backend's JSON payloads.
//!
//! Field names follow the backend (snake_case). Optional extras the backend
//! sends (`index` on change points, `description` on events) are kept so the
//! CLI can echo them, but nothing downstream requires them.

use serde::{Deserialize, Serialize};

/// Daily price series, index aligned: `dates[i]` belongs to `prices[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Check the equal-length invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.dates.len() != self.prices.len() {
            return Err(format!(
                "price series misaligned: {} dates vs {} prices",
                self.dates.len(),
                self.prices.len()
            ));
        }
        Ok(())
    }

    /// Position of `date` on the x axis, if present.
    pub fn position(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == date)
    }
}

/// A detected structural break in the mean price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    pub date: String,
    pub mean_before: f64,
    pub mean_after: f64,
    pub percent_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// An externally curated, dated market event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    pub fn new(date: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            event: event.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub date: String,
    pub volatility: f64,
}

/// Average percentage price change in the window around an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeAroundEvent {
    pub date: String,
    pub event: String,
    pub avg_price_change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub volatility: Vec<VolatilityPoint>,
    #[serde(default)]
    pub price_changes: Vec<PriceChangeAroundEvent>,
}

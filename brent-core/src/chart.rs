//! Chart model — joins the price series with indicators and places markers.
//!
//! Everything here is display-ready but terminal-agnostic: x positions are
//! indices into the price series, y values are raw prices/volatilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ChangePoint, Event, PriceSeries, VolatilityPoint};

/// One joined point of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub date: String,
    pub price: f64,
    /// `None` when the indicator series has no entry for this date.
    pub volatility: Option<f64>,
}

/// Join prices with volatility by exact date string. Linear search, first
/// match wins. One row per price point, in price-series order.
pub fn join_series(prices: &PriceSeries, volatility: &[VolatilityPoint]) -> Vec<ChartRow> {
    prices
        .dates
        .iter()
        .zip(prices.prices.iter())
        .map(|(date, &price)| ChartRow {
            date: date.clone(),
            price,
            volatility: volatility
                .iter()
                .find(|v| &v.date == date)
                .map(|v| v.volatility),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    ChangePoint,
    Event,
}

/// A vertical annotation line at a date on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: String,
    /// Index into the joined rows.
    pub x: usize,
    pub label: String,
    pub kind: MarkerKind,
}

/// Build markers for change points then events. Markers are keyed by date:
/// a later item on the same date replaces the earlier one in place. Dates
/// not present on the x axis produce no marker.
pub fn build_markers(rows: &[ChartRow], change_points: &[ChangePoint], events: &[Event]) -> Vec<Marker> {
    let axis: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .rev() // first occurrence wins on duplicate axis dates
        .map(|(i, r)| (r.date.as_str(), i))
        .collect();

    let candidates = change_points
        .iter()
        .map(|cp| {
            (
                cp.date.as_str(),
                format!("Change Point: {}", cp.date),
                MarkerKind::ChangePoint,
            )
        })
        .chain(
            events
                .iter()
                .map(|e| (e.date.as_str(), e.event.clone(), MarkerKind::Event)),
        );

    let mut markers: Vec<Marker> = Vec::new();
    let mut slot_by_date: HashMap<String, usize> = HashMap::new();

    for (date, label, kind) in candidates {
        let Some(&x) = axis.get(date) else {
            continue;
        };
        let marker = Marker {
            date: date.to_string(),
            x,
            label,
            kind,
        };
        match slot_by_date.get(date) {
            Some(&slot) => markers[slot] = marker,
            None => {
                slot_by_date.insert(date.to_string(), markers.len());
                markers.push(marker);
            }
        }
    }

    markers
}

/// Inclusive min/max of a value range, padded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds over the finite values, padded by `pad_frac` of the span.
    /// Returns `None` when there are no finite values.
    pub fn of(values: impl Iterator<Item = f64>, pad_frac: f64) -> Option<Self> {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        let span = max - min;
        // A flat series still needs a non-zero axis.
        let pad = if span == 0.0 {
            min.abs().max(1.0) * 0.05
        } else {
            span * pad_frac
        };
        Some(Self {
            min: min - pad,
            max: max + pad,
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Linearly map `v` from `self` into `target`.
    pub fn rescale(&self, v: f64, target: &Bounds) -> f64 {
        if self.span() == 0.0 {
            return target.min;
        }
        target.min + (v - self.min) / self.span() * target.span()
    }
}

/// Everything the renderer needs, computed from current dashboard state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartModel {
    pub rows: Vec<ChartRow>,
    pub markers: Vec<Marker>,
    pub price_bounds: Option<Bounds>,
    pub volatility_bounds: Option<Bounds>,
}

impl ChartModel {
    pub fn build(
        prices: &PriceSeries,
        volatility: &[VolatilityPoint],
        change_points: &[ChangePoint],
        events: &[Event],
    ) -> Self {
        let rows = join_series(prices, volatility);
        let markers = build_markers(&rows, change_points, events);
        let price_bounds = Bounds::of(rows.iter().map(|r| r.price), 0.05);
        let volatility_bounds = Bounds::of(rows.iter().filter_map(|r| r.volatility), 0.05);
        Self {
            rows,
            markers,
            price_bounds,
            volatility_bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Price points as `(x, price)`.
    pub fn price_points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.price))
            .collect()
    }

    /// Volatility mapped onto the price axis, split into contiguous runs so
    /// that gaps (absent values) break the line instead of bridging it.
    pub fn volatility_segments(&self) -> Vec<Vec<(f64, f64)>> {
        let (Some(vol), Some(price)) = (self.volatility_bounds, self.price_bounds) else {
            return Vec::new();
        };
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            match row.volatility {
                Some(v) if v.is_finite() => current.push((i as f64, vol.rescale(v, &price))),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Responsive chart sizing, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Viewports narrower than this use `viewport - margin`.
    pub breakpoint: u16,
    pub margin: u16,
    pub fixed_width: u16,
    pub height: u16,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            breakpoint: 120,
            margin: 4,
            fixed_width: 116,
            height: 22,
        }
    }
}

impl ChartLayout {
    /// `(width, height)` for a viewport of the given width.
    pub fn size_for(&self, viewport_width: u16) -> (u16, u16) {
        let width = if viewport_width < self.breakpoint {
            viewport_width.saturating_sub(self.margin)
        } else {
            self.fixed_width
        };
        (width, self.height)
    }
}

//! Brent Dashboard Core — data model and pure logic behind the dashboard.
//!
//! This crate contains everything that is not terminal rendering:
//! - Domain types matching the backend's JSON payloads
//! - Backend sources (HTTP, in-memory) behind one trait
//! - Dashboard state with independently resolved slots
//! - Date-range event filtering
//! - Price/volatility join, chart markers and responsive sizing
//! - Summary formatting and configuration

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod filter;
pub mod sample;
pub mod source;
pub mod summary;

pub use chart::{ChartLayout, ChartModel, ChartRow, Marker, MarkerKind};
pub use config::DashConfig;
pub use dashboard::Dashboard;
pub use domain::{ChangePoint, Event, Indicators, PriceChangeAroundEvent, PriceSeries, VolatilityPoint};
pub use filter::{FilterError, FilterRange};
pub use source::{DashboardSource, Endpoint, HttpSource, Payload, SourceError, StaticSource};

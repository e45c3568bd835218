//! Backend sources and structured fetch errors.
//!
//! The `DashboardSource` trait abstracts over where the four data sets come
//! from (the HTTP backend, an in-memory set for tests and the sample mode) so
//! the worker does not care which one it talks to.

use std::collections::HashSet;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{ChangePoint, Event, Indicators, PriceSeries};

/// The four read-only backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Prices,
    ChangePoints,
    Events,
    Indicators,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Prices,
        Endpoint::ChangePoints,
        Endpoint::Events,
        Endpoint::Indicators,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Prices => "/api/prices",
            Endpoint::ChangePoints => "/api/change_points",
            Endpoint::Events => "/api/events",
            Endpoint::Indicators => "/api/indicators",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Prices => "prices",
            Endpoint::ChangePoints => "change points",
            Endpoint::Events => "events",
            Endpoint::Indicators => "indicators",
        }
    }
}

/// A decoded response body for one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Prices(PriceSeries),
    ChangePoints(Vec<ChangePoint>),
    Events(Vec<Event>),
    Indicators(Indicators),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Prices(_) => Endpoint::Prices,
            Payload::ChangePoints(_) => Endpoint::ChangePoints,
            Payload::Events(_) => Endpoint::Events,
            Payload::Indicators(_) => Endpoint::Indicators,
        }
    }
}

/// Structured fetch errors, displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {path}")]
    HttpStatus { path: &'static str, status: u16 },

    #[error("failed to decode {path}: {message}")]
    Decode { path: &'static str, message: String },

    #[error("invalid data from {path}: {message}")]
    InvalidData { path: &'static str, message: String },

    #[error("{0}")]
    Other(String),
}

pub trait DashboardSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch and decode one endpoint. Exactly one attempt.
    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, SourceError>;
}

/// Decode a response body for an endpoint and enforce payload invariants.
pub fn decode(endpoint: Endpoint, body: &str) -> Result<Payload, SourceError> {
    fn parse<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, SourceError> {
        serde_json::from_str(body).map_err(|e| SourceError::Decode {
            path: endpoint.path(),
            message: e.to_string(),
        })
    }

    let payload = match endpoint {
        Endpoint::Prices => {
            let series: PriceSeries = parse(endpoint, body)?;
            series.validate().map_err(|message| SourceError::InvalidData {
                path: endpoint.path(),
                message,
            })?;
            Payload::Prices(series)
        }
        Endpoint::ChangePoints => Payload::ChangePoints(parse(endpoint, body)?),
        Endpoint::Events => Payload::Events(parse(endpoint, body)?),
        Endpoint::Indicators => Payload::Indicators(parse(endpoint, body)?),
    };
    Ok(payload)
}

/// The backend over HTTP (blocking client, JSON bodies).
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brent-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl DashboardSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, SourceError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SourceError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                path: endpoint.path(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| SourceError::NetworkUnreachable(e.to_string()))?;
        decode(endpoint, &body)
    }
}

/// In-memory source. Endpoints listed in `failing` return an error.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub prices: PriceSeries,
    pub change_points: Vec<ChangePoint>,
    pub events: Vec<Event>,
    pub indicators: Indicators,
    pub failing: HashSet<Endpoint>,
    pub delay: Option<Duration>,
}

impl StaticSource {
    pub fn failing(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }
}

impl DashboardSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, SourceError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing.contains(&endpoint) {
            return Err(SourceError::HttpStatus {
                path: endpoint.path(),
                status: 500,
            });
        }
        Ok(match endpoint {
            Endpoint::Prices => Payload::Prices(self.prices.clone()),
            Endpoint::ChangePoints => Payload::ChangePoints(self.change_points.clone()),
            Endpoint::Events => Payload::Events(self.events.clone()),
            Endpoint::Indicators => Payload::Indicators(self.indicators.clone()),
        })
    }
}

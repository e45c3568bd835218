//! Dashboard state — the four fetched data sets plus the filtered event view.
//!
//! Each slot is independently settable and `None` until its fetch resolves;
//! readers see an empty default for unresolved slots. Slots are replaced
//! wholesale, never merged.

use crate::chart::ChartModel;
use crate::domain::{ChangePoint, Event, Indicators, PriceSeries};
use crate::filter::{filter_events, FilterError, FilterRange};
use crate::source::{Endpoint, Payload};

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    prices: Option<PriceSeries>,
    change_points: Option<Vec<ChangePoint>>,
    events: Option<Vec<Event>>,
    indicators: Option<Indicators>,
    filtered_events: Vec<Event>,
    active_filter: FilterRange,
    /// Rebuilt whenever an input of the chart changes; read every frame.
    chart: ChartModel,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot matching the payload. Events also reset the filtered
    /// view to the full list.
    pub fn apply(&mut self, payload: Payload) {
        match payload {
            Payload::Prices(p) => self.prices = Some(p),
            Payload::ChangePoints(cps) => self.change_points = Some(cps),
            Payload::Events(events) => {
                self.filtered_events = events.clone();
                self.active_filter = FilterRange::default();
                self.events = Some(events);
            }
            Payload::Indicators(ind) => self.indicators = Some(ind),
        }
        self.rebuild_chart();
    }

    /// Recompute the filtered events for `[start, end]`. Either bound empty
    /// restores the full list. On error the previous view is kept.
    pub fn handle_filter(&mut self, start: &str, end: &str) -> Result<(), FilterError> {
        let range = FilterRange::new(start, end);
        let filtered = filter_events(self.events(), &range)?;
        self.filtered_events = filtered;
        self.active_filter = if range.is_unbounded() {
            FilterRange::default()
        } else {
            range
        };
        self.rebuild_chart();
        Ok(())
    }

    pub fn is_resolved(&self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Prices => self.prices.is_some(),
            Endpoint::ChangePoints => self.change_points.is_some(),
            Endpoint::Events => self.events.is_some(),
            Endpoint::Indicators => self.indicators.is_some(),
        }
    }

    pub fn prices(&self) -> &PriceSeries {
        static EMPTY: PriceSeries = PriceSeries {
            dates: Vec::new(),
            prices: Vec::new(),
        };
        self.prices.as_ref().unwrap_or(&EMPTY)
    }

    pub fn change_points(&self) -> &[ChangePoint] {
        self.change_points.as_deref().unwrap_or(&[])
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_deref().unwrap_or(&[])
    }

    pub fn indicators(&self) -> &Indicators {
        static EMPTY: Indicators = Indicators {
            volatility: Vec::new(),
            price_changes: Vec::new(),
        };
        self.indicators.as_ref().unwrap_or(&EMPTY)
    }

    pub fn filtered_events(&self) -> &[Event] {
        &self.filtered_events
    }

    pub fn active_filter(&self) -> &FilterRange {
        &self.active_filter
    }

    /// Chart model for the current snapshot.
    pub fn chart_model(&self) -> &ChartModel {
        &self.chart
    }

    fn rebuild_chart(&mut self) {
        self.chart = ChartModel::build(
            self.prices(),
            &self.indicators().volatility,
            self.change_points(),
            &self.filtered_events,
        );
    }
}

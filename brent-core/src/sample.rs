//! Deterministic sample data set for running the dashboard without a backend.
//!
//! Produces a noisy daily price walk with one regime shift, a rolling
//! volatility series that starts after its warm-up window, a handful of
//! events and their surrounding price changes.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{ChangePoint, Event, Indicators, PriceChangeAroundEvent, PriceSeries, VolatilityPoint};
use crate::source::StaticSource;

const VOL_WINDOW: usize = 30;
const EVENT_WINDOW_DAYS: i64 = 5;

pub fn sample_source(seed: u64) -> StaticSource {
    let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap_or_default();
    let dates = business_days(start, 360);
    let shift_at = dates.len() / 2;
    let prices = price_walk(dates.len(), shift_at, seed);

    let series = PriceSeries {
        dates: dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
        prices,
    };

    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len().max(1) as f64;
    let before = mean(&series.prices[..shift_at]);
    let after = mean(&series.prices[shift_at..]);
    let change_points = vec![ChangePoint {
        date: series.dates[shift_at].clone(),
        mean_before: before,
        mean_after: after,
        percent_change: (after - before) / before * 100.0,
        index: Some(shift_at),
    }];

    let events: Vec<Event> = [
        (40, "OPEC+ production cut"),
        (shift_at - 3, "Demand shock"),
        (shift_at + 60, "Inventory draw"),
        (dates.len() - 30, "Sanctions announced"),
    ]
    .into_iter()
    .map(|(i, label)| Event::new(series.dates[i].clone(), label))
    .collect();

    let indicators = Indicators {
        volatility: rolling_volatility(&series, VOL_WINDOW),
        price_changes: events
            .iter()
            .filter_map(|e| price_change_around(&series, e))
            .collect(),
    };

    StaticSource {
        prices: series,
        change_points,
        events,
        indicators,
        ..StaticSource::default()
    }
}

fn business_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(count);
    let mut d = start;
    while out.len() < count {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(d);
        }
        d += Duration::days(1);
    }
    out
}

fn price_walk(n: usize, shift_at: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 62.0;
    (0..n)
        .map(|i| {
            if i == shift_at {
                price *= 0.7;
            }
            let shock: f64 = rng.gen_range(-0.02..0.02);
            price = (price * (1.0 + shock)).max(5.0);
            price
        })
        .collect()
}

fn rolling_volatility(series: &PriceSeries, window: usize) -> Vec<VolatilityPoint> {
    if series.prices.len() < window {
        return Vec::new();
    }
    series
        .prices
        .windows(window)
        .enumerate()
        .map(|(i, w)| {
            let mean = w.iter().sum::<f64>() / window as f64;
            let var = w.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
            VolatilityPoint {
                date: series.dates[i + window - 1].clone(),
                volatility: var.sqrt(),
            }
        })
        .collect()
}

fn price_change_around(series: &PriceSeries, event: &Event) -> Option<PriceChangeAroundEvent> {
    let center = NaiveDate::parse_from_str(&event.date, "%Y-%m-%d").ok()?;
    let lo = center - Duration::days(EVENT_WINDOW_DAYS);
    let hi = center + Duration::days(EVENT_WINDOW_DAYS);

    let window: Vec<f64> = series
        .dates
        .iter()
        .zip(&series.prices)
        .filter(|(d, _)| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok_and(|d| d >= lo && d <= hi)
        })
        .map(|(_, &p)| p)
        .collect();
    if window.is_empty() {
        return None;
    }

    let changes: Vec<f64> = window.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    let avg = if changes.is_empty() {
        0.0
    } else {
        changes.iter().sum::<f64>() / changes.len() as f64 * 100.0
    };
    Some(PriceChangeAroundEvent {
        date: event.date.clone(),
        event: event.event.clone(),
        avg_price_change: avg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DashboardSource, Endpoint, Payload};

    #[test]
    fn sample_is_deterministic_and_consistent() {
        let a = sample_source(7);
        let b = sample_source(7);
        assert_eq!(a.prices, b.prices);
        assert!(a.prices.validate().is_ok());
        assert_eq!(a.prices.len(), 360);
        assert_eq!(a.change_points.len(), 1);
        assert_eq!(a.events.len(), 4);
        assert_eq!(a.indicators.price_changes.len(), 4);
    }

    #[test]
    fn volatility_starts_after_warmup() {
        let src = sample_source(1);
        assert_eq!(src.indicators.volatility.len(), 360 - VOL_WINDOW + 1);
        assert_eq!(src.indicators.volatility[0].date, src.prices.dates[VOL_WINDOW - 1]);
    }

    #[test]
    fn no_weekend_dates() {
        let src = sample_source(1);
        for d in &src.prices.dates {
            let d = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
            assert!(!matches!(d.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn serves_all_endpoints() {
        let src = sample_source(3);
        for ep in Endpoint::ALL {
            let payload = src.fetch(ep).unwrap();
            assert_eq!(payload.endpoint(), ep);
        }
        assert!(matches!(src.fetch(Endpoint::Prices).unwrap(), Payload::Prices(p) if p.len() == 360));
    }
}

//! Date-range filtering of events.
//!
//! Bounds are compared as calendar dates, never as strings. An empty bound on
//! either side means "no filter".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Event;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid {field} date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// User-selected date bounds. Empty strings mean unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRange {
    pub start_date: String,
    pub end_date: String,
}

impl FilterRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    /// True when either bound is empty, i.e. the range filters nothing out.
    pub fn is_unbounded(&self) -> bool {
        self.start_date.trim().is_empty() || self.end_date.trim().is_empty()
    }

    /// Parse both bounds. `Ok(None)` for an unbounded range.
    pub fn bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, FilterError> {
        if self.is_unbounded() {
            return Ok(None);
        }
        let start = parse_date(&self.start_date).ok_or_else(|| FilterError::InvalidDate {
            field: "start",
            value: self.start_date.clone(),
        })?;
        let end = parse_date(&self.end_date).ok_or_else(|| FilterError::InvalidDate {
            field: "end",
            value: self.end_date.clone(),
        })?;
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Some((start, end)))
    }
}

/// Parse a backend or user date. Accepts `YYYY-MM-DD` and full RFC 3339
/// timestamps (date part only).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Events whose date lies in the inclusive range. An unbounded range returns
/// every event in original order. Events with unparseable dates never match a
/// bounded range.
pub fn filter_events(events: &[Event], range: &FilterRange) -> Result<Vec<Event>, FilterError> {
    let Some((start, end)) = range.bounds()? else {
        return Ok(events.to_vec());
    };

    Ok(events
        .iter()
        .filter(|e| parse_date(&e.date).is_some_and(|d| d >= start && d <= end))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<Event> {
        vec![Event::new("2020-03-01", "A"), Event::new("2020-06-01", "B")]
    }

    #[test]
    fn range_keeps_events_inside() {
        let out = filter_events(&events(), &FilterRange::new("2020-02-01", "2020-04-01")).unwrap();
        assert_eq!(out, vec![Event::new("2020-03-01", "A")]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let out = filter_events(&events(), &FilterRange::new("2020-03-01", "2020-06-01")).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_bound_returns_everything() {
        assert_eq!(filter_events(&events(), &FilterRange::default()).unwrap(), events());
        assert_eq!(
            filter_events(&events(), &FilterRange::new("2020-05-01", "")).unwrap(),
            events()
        );
        assert_eq!(
            filter_events(&events(), &FilterRange::new("  ", "2020-05-01")).unwrap(),
            events()
        );
    }

    #[test]
    fn compares_dates_not_strings() {
        // As a string the timestamp sorts after "2020-10-01"; as a date it is equal.
        let evs = vec![Event::new("2020-10-01T23:00:00Z", "rfc")];
        let out = filter_events(&evs, &FilterRange::new("2020-09-30", "2020-10-01")).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = filter_events(&events(), &FilterRange::new("2020-04-01", "2020-02-01")).unwrap_err();
        assert!(matches!(err, FilterError::InvertedRange { .. }));
    }

    #[test]
    fn garbage_bound_is_rejected() {
        let err = filter_events(&events(), &FilterRange::new("yesterday", "2020-02-01")).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidDate {
                field: "start",
                value: "yesterday".into()
            }
        );
    }

    #[test]
    fn unparseable_event_date_never_matches() {
        let evs = vec![Event::new("sometime", "X"), Event::new("2020-03-01", "A")];
        let out = filter_events(&evs, &FilterRange::new("2000-01-01", "2030-01-01")).unwrap();
        assert_eq!(out, vec![Event::new("2020-03-01", "A")]);
    }
}

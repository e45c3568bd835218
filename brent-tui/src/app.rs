//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! responses are folded into the dashboard as they arrive, in any order.

use std::collections::{BTreeSet, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use brent_core::chart::ChartLayout;
use brent_core::source::{Endpoint, SourceError};
use brent_core::Dashboard;

use crate::form::{FilterForm, FilterRequest};
use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Filter,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Filter => "FLT",
            ErrorCategory::Other => "ERR",
        }
    }

    fn of(error: &SourceError) -> Self {
        match error {
            SourceError::NetworkUnreachable(_) | SourceError::HttpStatus { .. } => ErrorCategory::Network,
            SourceError::Decode { .. } | SourceError::InvalidData { .. } => ErrorCategory::Data,
            SourceError::Other(_) => ErrorCategory::Other,
        }
    }
}

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Chart and summary: global keys, summary scrolling.
    Chart,
    /// The filter form consumes typing.
    Form,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,

    // Dashboard container
    pub dashboard: Dashboard,
    pub form: FilterForm,
    pub layout: ChartLayout,
    pub summary_scroll: usize,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub generation: u64,
    pub pending: BTreeSet<Endpoint>,

    // Cross-cutting
    pub source_label: String,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        layout: ChartLayout,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Chart,
            overlay: Overlay::None,
            dashboard: Dashboard::new(),
            form: FilterForm::new(),
            layout,
            summary_scroll: 0,
            worker_tx,
            worker_rx,
            generation: 0,
            pending: BTreeSet::new(),
            source_label: source_label.into(),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        }
    }

    /// Start a new load generation: all four endpoints are requested again
    /// and responses from earlier generations are ignored from now on.
    pub fn request_load(&mut self) {
        self.generation += 1;
        self.pending = Endpoint::ALL.into_iter().collect();
        if self
            .worker_tx
            .send(WorkerCommand::Load {
                generation: self.generation,
            })
            .is_err()
        {
            self.pending.clear();
            self.push_error(
                ErrorCategory::Other,
                "worker is not running".into(),
                "load".into(),
            );
            return;
        }
        self.set_status(format!("Loading from {}...", self.source_label));
    }

    /// Drain every response currently queued, without blocking.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_response(resp);
        }
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        if resp.generation() != self.generation {
            tracing::debug!(
                stale = resp.generation(),
                current = self.generation,
                "dropping stale response"
            );
            return;
        }

        match resp {
            WorkerResponse::Loaded { payload, .. } => {
                let endpoint = payload.endpoint();
                tracing::info!(endpoint = endpoint.path(), "fetched");
                self.pending.remove(&endpoint);
                self.dashboard.apply(payload);
                match endpoint {
                    Endpoint::ChangePoints | Endpoint::Indicators => self.summary_scroll = 0,
                    // Fresh events drop the active filter, so the form follows.
                    Endpoint::Events => {
                        self.form.clear();
                    }
                    Endpoint::Prices => {}
                }
                if self.pending.is_empty() {
                    self.set_status("All data loaded");
                }
            }
            WorkerResponse::FetchFailed { endpoint, error, .. } => {
                tracing::error!(endpoint = endpoint.path(), error = %error, "fetch failed");
                self.pending.remove(&endpoint);
                self.push_error(
                    ErrorCategory::of(&error),
                    format!("Error fetching {}: {error}", endpoint.label()),
                    endpoint.path().to_string(),
                );
            }
        }
    }

    /// Apply a filter request from the form. Rejected ranges keep the
    /// current view and surface a warning.
    pub fn apply_filter(&mut self, req: FilterRequest) {
        match self.dashboard.handle_filter(&req.start, &req.end) {
            Ok(()) => {
                let shown = self.dashboard.filtered_events().len();
                let total = self.dashboard.events().len();
                tracing::info!(start = %req.start, end = %req.end, shown, total, "filter applied");
                if self.dashboard.active_filter().is_unbounded() {
                    self.set_status(format!("Filter cleared: {total} events"));
                } else {
                    self.set_status(format!("Showing {shown} of {total} events"));
                }
            }
            Err(e) => {
                tracing::warn!(start = %req.start, end = %req.end, error = %e, "filter rejected");
                self.push_error(ErrorCategory::Filter, e.to_string(), "filter".into());
                self.status_message = Some((e.to_string(), StatusLevel::Warning));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brent_core::source::Payload;
    use brent_core::Event;
    use std::sync::mpsc;

    fn app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, rx) = mpsc::channel();
        let (_tx2, rx2) = mpsc::channel();
        (AppState::new(tx, rx2, ChartLayout::default(), "test"), rx)
    }

    fn events() -> Vec<Event> {
        vec![Event::new("2020-03-01", "A"), Event::new("2020-06-01", "B")]
    }

    #[test]
    fn request_load_bumps_generation_and_sends() {
        let (mut app, rx) = app();
        app.request_load();
        app.request_load();
        assert_eq!(app.generation, 2);
        assert_eq!(app.pending.len(), 4);
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Load { generation: 1 })));
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Load { generation: 2 })));
    }

    #[test]
    fn request_load_without_worker_records_error() {
        let (mut app, rx) = app();
        drop(rx);
        app.request_load();
        assert!(!app.is_loading());
        assert_eq!(app.error_history.len(), 1);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let (mut app, _rx) = app();
        app.request_load();
        app.request_load();
        app.handle_response(WorkerResponse::Loaded {
            generation: 1,
            payload: Payload::Events(events()),
        });
        assert!(app.dashboard.events().is_empty());
        assert_eq!(app.pending.len(), 4);
    }

    #[test]
    fn failed_fetch_leaves_slot_empty_and_records_error() {
        let (mut app, _rx) = app();
        app.request_load();
        app.handle_response(WorkerResponse::FetchFailed {
            generation: 1,
            endpoint: Endpoint::ChangePoints,
            error: SourceError::HttpStatus {
                path: "/api/change_points",
                status: 500,
            },
        });
        assert!(app.dashboard.change_points().is_empty());
        assert!(!app.dashboard.is_resolved(Endpoint::ChangePoints));
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert_eq!(app.pending.len(), 3);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn filter_roundtrip_through_app() {
        let (mut app, _rx) = app();
        app.request_load();
        app.handle_response(WorkerResponse::Loaded {
            generation: 1,
            payload: Payload::Events(events()),
        });

        app.apply_filter(FilterRequest {
            start: "2020-02-01".into(),
            end: "2020-04-01".into(),
        });
        assert_eq!(app.dashboard.filtered_events(), &[Event::new("2020-03-01", "A")]);

        app.apply_filter(FilterRequest {
            start: String::new(),
            end: String::new(),
        });
        assert_eq!(app.dashboard.filtered_events(), events().as_slice());
    }

    #[test]
    fn inverted_filter_warns_and_keeps_view() {
        let (mut app, _rx) = app();
        app.dashboard.apply(Payload::Events(events()));
        app.apply_filter(FilterRequest {
            start: "2020-09-01".into(),
            end: "2020-01-01".into(),
        });
        assert_eq!(app.dashboard.filtered_events().len(), 2);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
        assert_eq!(app.error_history[0].category, ErrorCategory::Filter);
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn events_reload_clears_form_with_the_filter() {
        let (mut app, _rx) = app();
        app.request_load();
        app.handle_response(WorkerResponse::Loaded {
            generation: 1,
            payload: Payload::Events(events()),
        });
        app.form.start = "2020-02-01".into();
        app.form.end = "2020-04-01".into();
        let req = app.form.submit();
        app.apply_filter(req);
        assert!(!app.dashboard.active_filter().is_unbounded());

        app.request_load();
        app.handle_response(WorkerResponse::Loaded {
            generation: 2,
            payload: Payload::Events(events()),
        });
        assert!(app.dashboard.active_filter().is_unbounded());
        assert!(app.form.start.is_empty());
        assert!(app.form.end.is_empty());
        assert_eq!(app.dashboard.filtered_events().len(), 2);
    }
}

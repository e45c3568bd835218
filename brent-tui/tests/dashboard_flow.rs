//! End-to-end: worker fetches from a static source, the app state absorbs
//! the responses, and the whole screen renders into a test backend.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use brent_core::sample::sample_source;
use brent_core::{ChartLayout, DashboardSource, Endpoint, MarkerKind};
use brent_tui::app::{AppState, ErrorCategory};
use brent_tui::form::FilterRequest;
use brent_tui::ui;
use brent_tui::ui::summary_panel::summary_lines;
use brent_tui::worker::{self, WorkerCommand};

fn run_until_loaded(source: Arc<dyn DashboardSource>) -> (AppState, mpsc::Sender<WorkerCommand>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    worker::spawn_worker(source, cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, ChartLayout::default(), "test");
    app.request_load();

    let deadline = Instant::now() + Duration::from_secs(10);
    while app.is_loading() {
        assert!(Instant::now() < deadline, "load did not finish: {:?}", app.pending);
        app.drain_worker();
        std::thread::sleep(Duration::from_millis(5));
    }
    (app, cmd_tx)
}

fn screen_text(app: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn full_load_renders_every_section() {
    let (app, cmd_tx) = run_until_loaded(Arc::new(sample_source(3)));

    assert!(app.error_history.is_empty());
    assert!(!app.dashboard.prices().is_empty());
    assert!(!app.dashboard.change_points().is_empty());
    assert_eq!(app.dashboard.filtered_events().len(), app.dashboard.events().len());

    let text = screen_text(&app, 140, 60);
    assert!(text.contains(ui::TITLE));
    assert!(text.contains("Brent Oil Prices with Change Points and Events"));
    assert!(text.contains("Change Point Details"));
    assert!(text.contains("Mean Price Before"));
    assert!(text.contains("Price Changes Around Events"));
    assert!(text.contains("All data loaded"));

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
}

#[test]
fn failed_endpoint_leaves_other_slots_intact() {
    let source = sample_source(3).failing(Endpoint::ChangePoints);
    let expected_events = source.events.len();
    let (app, cmd_tx) = run_until_loaded(Arc::new(source));

    assert!(app.dashboard.change_points().is_empty());
    assert!(!app.dashboard.prices().is_empty());
    assert_eq!(app.dashboard.events().len(), expected_events);
    assert!(!app.dashboard.indicators().volatility.is_empty());

    assert_eq!(app.error_history.len(), 1);
    assert_eq!(app.error_history[0].category, ErrorCategory::Network);
    assert_eq!(app.error_history[0].context, "/api/change_points");

    // Event markers survive; no change-point marker is drawn.
    let markers = &app.dashboard.chart_model().markers;
    assert!(markers.iter().any(|m| m.kind == MarkerKind::Event));
    assert!(markers.iter().all(|m| m.kind != MarkerKind::ChangePoint));

    // Change Point Details holds only the placeholder.
    let lines: Vec<String> = summary_lines(&app.dashboard).iter().map(|l| l.to_string()).collect();
    let start = lines.iter().position(|l| l == "Change Point Details").unwrap();
    let end = lines.iter().position(|l| l == "Price Changes Around Events").unwrap();
    let section = &lines[start + 1..end];
    assert!(section.iter().any(|l| l.contains("(none)")));
    assert!(section.iter().all(|l| !l.contains("Mean Price Before")));

    let text = screen_text(&app, 140, 60);
    assert!(text.contains("Brent Oil Prices with Change Points and Events"));
    assert!(!text.contains("Mean Price Before"));

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
}

#[test]
fn filter_narrows_rendered_event_count() {
    let (mut app, cmd_tx) = run_until_loaded(Arc::new(sample_source(3)));
    let total = app.dashboard.events().len();
    let first = app.dashboard.events()[0].date.clone();

    app.apply_filter(FilterRequest {
        start: first.clone(),
        end: first.clone(),
    });
    let shown = app.dashboard.filtered_events().len();
    assert!(shown >= 1 && shown < total);

    let text = screen_text(&app, 140, 60);
    assert!(text.contains(&format!("Events ({shown} of {total})")));

    app.apply_filter(FilterRequest {
        start: String::new(),
        end: String::new(),
    });
    assert_eq!(app.dashboard.filtered_events().len(), total);

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
}

#[test]
fn narrow_terminal_still_draws() {
    let (app, cmd_tx) = run_until_loaded(Arc::new(sample_source(3)));
    let text = screen_text(&app, 60, 40);
    assert!(text.contains("Brent Oil"));
    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
}

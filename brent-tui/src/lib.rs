//! Brent Dashboard TUI — terminal front end for the oil price dashboard.
//!
//! Provides:
//! - A date-range filter form for the annotated events
//! - A price/volatility chart with change-point and event markers
//! - A scrollable summary of change points and event price changes
//! - Background loading of the four backend endpoints, one thread each

pub mod app;
pub mod form;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;

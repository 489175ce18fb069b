//! GUI panels and application state.

pub mod app;
pub mod chart_panel;
pub mod components;
pub mod filter_form;
pub mod manpower_panel;
pub mod report_panel;

pub use app::App;

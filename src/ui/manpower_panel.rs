//! Manpower panel: per-department head counts for one day.

use eframe::egui::Ui;
use egui_extras::DatePickerButton;
use egui_phosphor::regular::ARROWS_CLOCKWISE;

use crate::report::manpower_columns;

use super::app::App;
use super::components::{colors, empty_state, loading_indicator, panel_header, styled_button_with_icon};
use super::report_panel::{DetailLinks, show_table};

/// Show the manpower panel.
///
/// Reloads whenever the selected date differs from the last requested one.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Manpower by Department");

    let mut refresh = false;
    ui.horizontal(|ui| {
        ui.label("Date:");
        ui.add(DatePickerButton::new(&mut app.manpower_date).id_salt("manpower_date"));

        ui.add_space(20.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Load").clicked() {
            refresh = true;
        }
    });

    if refresh || app.manpower_requested != Some(app.manpower_date) {
        app.load_manpower();
    }

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    if app.manpower.is_loading() {
        loading_indicator(ui);
        return;
    }

    if let Some(error) = app.manpower.last_error() {
        ui.colored_label(colors::ERROR, format!("Error: {error}"));
        return;
    }

    if app.manpower.is_empty() {
        empty_state(ui);
        return;
    }

    let links = DetailLinks {
        base_url: app.client.base_url(),
        detail_path: &app.config.api.detail_path,
    };
    show_table(ui, "manpower_grid", app.manpower.rows(), &manpower_columns(), &links);
}

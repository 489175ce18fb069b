//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235);

    /// Scanned series.
    pub const SCANNED: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
    /// Not-scanned series.
    pub const NOT_SCANNED: Color32 = Color32::from_rgb(0xFF, 0xC1, 0x07);
    /// Chart value labels.
    pub const VALUE_LABEL: Color32 = Color32::from_rgb(0x87, 0x87, 0x87);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with an icon prefix.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(egui::Button::new(format!("{icon} {label}")).min_size(egui::vec2(0.0, 28.0)))
}

/// Filled call-to-action button with an icon prefix.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(
        egui::Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(0.0, 28.0)),
    )
}

/// Centered spinner for a section that is loading.
pub fn loading_indicator(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.add(egui::Spinner::new().size(32.0));
    });
}

/// Centered "no data" message.
pub fn empty_state(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("No data").size(16.0).color(colors::NEUTRAL));
    });
}

//! Attendance report panel with filters, results table, and CSV export.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_CSV, MAGNIFYING_GLASS};

use crate::models::NormalizedReportRow;
use crate::report::{ReportColumn, detail_url, row_key, visible_columns};

use super::app::App;
use super::components::{empty_state, loading_indicator, panel_header, styled_button_with_icon};
use super::filter_form;

/// Where detail links point to.
pub struct DetailLinks<'a> {
    pub base_url: &'a str,
    pub detail_path: &'a str,
}

/// Show the report panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Attendance Report");

    if let Some(selection) = filter_form::show(&mut app.filter_form, ui) {
        app.search(selection);
    }

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    if app.report.is_loading() {
        loading_indicator(ui);
        return;
    }

    if app.report.is_empty() {
        empty_state(ui);
        return;
    }

    let mut export_clicked = false;
    ui.horizontal(|ui| {
        ui.label(format!("{} records", app.report.rows().len()));
        ui.add_space(20.0);
        if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
            export_clicked = true;
        }
    });
    ui.add_space(10.0);

    let columns = visible_columns(app.filter.current().scan_status);
    let links = DetailLinks {
        base_url: app.client.base_url(),
        detail_path: &app.config.api.detail_path,
    };
    show_table(ui, "attendance_report_grid", app.report.rows(), &columns, &links);

    if export_clicked {
        app.export_report();
    }
}

/// Render rows as a striped grid with a trailing detail-link column.
pub fn show_table(
    ui: &mut Ui,
    id_salt: &str,
    rows: &[NormalizedReportRow],
    columns: &[ReportColumn],
    links: &DetailLinks<'_>,
) {
    ScrollArea::both().id_salt(id_salt).show(ui, |ui| {
        egui::Grid::new(id_salt)
            .num_columns(columns.len() + 1)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for column in columns {
                    ui.strong(column.header());
                }
                ui.label("");
                ui.end_row();

                for (index, row) in rows.iter().enumerate() {
                    for column in columns {
                        ui.label(column.cell(row));
                    }
                    ui.push_id(row_key(row, index), |ui| detail_link(ui, row, links));
                    ui.end_row();
                }
            });
    });
}

fn detail_link(ui: &mut Ui, row: &NormalizedReportRow, links: &DetailLinks<'_>) {
    let icon = RichText::new(MAGNIFYING_GLASS).size(20.0);
    match detail_url(links.base_url, links.detail_path, row) {
        Some(url) => {
            ui.hyperlink_to(icon, url).on_hover_text("Open detail report");
        }
        None => {
            ui.add_enabled(false, egui::Button::new(icon).frame(false))
                .on_disabled_hover_text("No employee for this row");
        }
    }
}

//! Department chart panel: stacked scanned/not-scanned bars with zoom and pan.

use eframe::egui::{self, Align2, FontId, Rect, Response, RichText, Sense, Stroke, TextEdit, Ui, pos2, vec2};
use egui_phosphor::regular::ARROWS_CLOCKWISE;
use tracing::debug;

use crate::chart::{ChartState, ChartWindow, show_value_labels};
use crate::models::ChartPoint;

use super::app::App;
use super::components::{colors, panel_header, styled_button_with_icon};

const CHART_HEIGHT: f32 = 500.0;
const AXIS_LEFT: f32 = 48.0;
const AXIS_BOTTOM: f32 = 56.0;
const LEGEND_TOP: f32 = 32.0;
const Y_TICKS: u64 = 5;

/// Show the chart panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Scanned vs. Not Scanned by Department");

    ui.horizontal(|ui| {
        ui.label("Endpoint:");
        ui.add(TextEdit::singleline(&mut app.chart_endpoint_input).desired_width(360.0));
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Apply").clicked() {
            app.chart.endpoint = app.chart_endpoint_input.trim().to_string();
        }
    });
    ui.label(
        RichText::new("Scroll to zoom, drag to pan, double-click to reset")
            .small()
            .weak(),
    );
    ui.add_space(10.0);

    let size = vec2(ui.available_width(), CHART_HEIGHT.min(ui.available_height()).max(200.0));
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

    if ui.is_rect_visible(rect) && app.chart.mark_in_view() {
        debug!("Department chart entered view");
    }
    if app.chart.needs_fetch() {
        app.load_chart();
    }

    ui.painter()
        .rect_filled(rect, 8.0, ui.style().visuals.extreme_bg_color);

    if app.chart.is_loading() {
        ui.put(
            Rect::from_center_size(rect.center(), vec2(32.0, 32.0)),
            egui::Spinner::new().size(32.0),
        );
        return;
    }

    if app.chart.points().is_empty() {
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No data",
            FontId::proportional(16.0),
            colors::NEUTRAL,
        );
        return;
    }

    let plot = plot_rect(rect);
    handle_input(&mut app.chart, &response, plot, ui);

    let now = ui.input(|i| i.time);
    let progress = app.chart.animation_progress(now);
    if progress < 1.0 {
        ui.ctx().request_repaint();
    }

    paint_legend(ui, rect);
    paint_chart(ui, plot, app.chart.points(), app.chart.window(), progress);
    show_tooltip(response, plot, app.chart.points(), app.chart.window());
}

fn plot_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.left() + AXIS_LEFT, rect.top() + LEGEND_TOP),
        pos2(rect.right() - 12.0, rect.bottom() - AXIS_BOTTOM),
    )
}

/// Mouse wheel zooms around the pointer, drag pans, double-click resets.
fn handle_input(chart: &mut ChartState, response: &Response, plot: Rect, ui: &Ui) {
    let total = chart.points().len();
    let window = chart.window_mut();

    if response.double_clicked() {
        *window = ChartWindow::full(total);
        return;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = response
                .hover_pos()
                .map(|p| (p.x - plot.left()) / plot.width())
                .unwrap_or(0.5);
            window.zoom((-scroll * 0.002).exp(), anchor);
        }
    }

    if response.dragged() && plot.width() > 0.0 {
        let dx = response.drag_delta().x;
        window.pan(-dx / plot.width() * window.len());
    }
}

/// Round the axis maximum up to a multiple of the tick count.
fn axis_max(max_total: u64) -> u64 {
    let step = max_total.div_ceil(Y_TICKS).max(1);
    step * Y_TICKS
}

fn category_x(plot: Rect, window: &ChartWindow, index: usize) -> f32 {
    let slot = plot.width() / window.len().max(1.0);
    plot.left() + (index as f32 + 0.5 - window.start()) * slot
}

fn paint_legend(ui: &Ui, rect: Rect) {
    let painter = ui.painter();
    let mut x = rect.center().x - 110.0;
    let y = rect.top() + 14.0;

    for (color, label) in [(colors::SCANNED, "Scanned"), (colors::NOT_SCANNED, "Not scanned")] {
        painter.rect_filled(Rect::from_center_size(pos2(x, y), vec2(12.0, 12.0)), 2.0, color);
        let text_rect = painter.text(
            pos2(x + 10.0, y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        x = text_rect.right() + 30.0;
    }
}

fn paint_chart(ui: &Ui, plot: Rect, points: &[ChartPoint], window: &ChartWindow, progress: f32) {
    let painter = ui.painter_at(plot.expand2(vec2(AXIS_LEFT, AXIS_BOTTOM)));
    let text_color = ui.visuals().text_color();
    let grid_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    let range = window.visible_range();

    let max_total = points[range.clone()].iter().map(ChartPoint::total).max().unwrap_or(0);
    let y_max = axis_max(max_total) as f32;
    let y_of = |value: f32| plot.bottom() - value / y_max * plot.height();

    // Y axis grid and labels
    for tick in 0..=Y_TICKS {
        let value = y_max / Y_TICKS as f32 * tick as f32;
        let y = y_of(value);
        painter.line_segment([pos2(plot.left(), y), pos2(plot.right(), y)], Stroke::new(1.0, grid_color));
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{}", value.round() as u64),
            FontId::proportional(11.0),
            text_color,
        );
    }

    let slot = plot.width() / window.len().max(1.0);
    let bar_width = (slot * 0.6).max(1.0);
    let labels = show_value_labels(window.visible_ticks());
    let bars = painter.with_clip_rect(plot);
    let name_every = ((40.0 / slot).ceil() as usize).max(1);

    for index in range {
        let point = &points[index];
        let x = category_x(plot, window, index);
        let scanned = point.scanned_count as f32 * progress;
        let not_scanned = point.not_scanned_count as f32 * progress;

        let base = plot.bottom();
        let scanned_top = y_of(scanned);
        let stack_top = y_of(scanned + not_scanned);

        bars.rect_filled(
            Rect::from_min_max(pos2(x - bar_width / 2.0, scanned_top), pos2(x + bar_width / 2.0, base)),
            0.0,
            colors::SCANNED,
        );
        bars.rect_filled(
            Rect::from_min_max(
                pos2(x - bar_width / 2.0, stack_top),
                pos2(x + bar_width / 2.0, scanned_top),
            ),
            0.0,
            colors::NOT_SCANNED,
        );

        // Total on top of the not-scanned segment
        if labels && point.total() > 0 {
            bars.text(
                pos2(x, stack_top - 6.0),
                Align2::CENTER_BOTTOM,
                point.total().to_string(),
                FontId::proportional(11.0),
                colors::VALUE_LABEL,
            );
        }

        if index % name_every == 0 {
            painter.text(
                pos2(x, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                truncate(&point.department, (slot * name_every as f32 / 7.0) as usize),
                FontId::proportional(11.0),
                text_color,
            );
        }
    }

    painter.line_segment(
        [pos2(plot.left(), plot.bottom()), pos2(plot.right(), plot.bottom())],
        Stroke::new(1.0, text_color),
    );
}

fn show_tooltip(response: Response, plot: Rect, points: &[ChartPoint], window: &ChartWindow) {
    let Some(pos) = response.hover_pos() else {
        return;
    };
    if !plot.contains(pos) || response.dragged() {
        return;
    }

    let slot = plot.width() / window.len().max(1.0);
    let index = (window.start() + (pos.x - plot.left()) / slot).floor();
    if index < 0.0 {
        return;
    }
    if let Some(point) = points.get(index as usize) {
        response.on_hover_text_at_pointer(format!(
            "{}\nScanned: {}\nNot scanned: {}",
            point.department, point.scanned_count, point.not_scanned_count
        ));
    }
}

/// Shorten a category name to at most `max_chars` characters.
fn truncate(name: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(3);
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut short: String = name.chars().take(max_chars - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max_rounds_up() {
        assert_eq!(axis_max(0), 5);
        assert_eq!(axis_max(5), 5);
        assert_eq!(axis_max(12), 15);
        assert_eq!(axis_max(101), 105);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Cutting", 10), "Cutting");
        assert_eq!(truncate("Quality Assurance", 8), "Quality…");
        assert_eq!(truncate("Warehouse", 0), "Wa…");
    }

    #[test]
    fn test_category_x_follows_window() {
        let plot = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        let mut window = ChartWindow::full(10);
        assert_eq!(category_x(plot, &window, 0), 5.0);

        window.zoom(0.5, 0.0);
        window.pan(5.0);
        assert_eq!(category_x(plot, &window, 5), 10.0);
    }
}

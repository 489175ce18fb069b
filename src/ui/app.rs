//! Main application UI.

use std::future::Future;

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Align, Layout};
use egui_phosphor::regular::{CHART_BAR, TABLE, USERS};
use tokio::sync::mpsc;
use tracing::info;

use crate::chart::ChartState;
use crate::client::ReportClient;
use crate::config::AppConfig;
use crate::export;
use crate::feed::{Feed, FetchTicket};
use crate::models::{ChartPoint, DepartmentOption, FilterSelection, NormalizedReportRow};
use crate::report::{FilterState, load_department_options};

use super::components::colors;
use super::filter_form::FilterForm;
use super::{chart_panel, manpower_panel, report_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Report,
    Manpower,
    Chart,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Report, Panel::Manpower, Panel::Chart];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Report => "Attendance Report",
            Panel::Manpower => "Manpower",
            Panel::Chart => "Department Chart",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Panel::Report => TABLE,
            Panel::Manpower => USERS,
            Panel::Chart => CHART_BAR,
        }
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    DepartmentsLoaded(Vec<DepartmentOption>),
    ReportLoaded {
        ticket: FetchTicket,
        result: Result<Vec<NormalizedReportRow>, String>,
    },
    ManpowerLoaded {
        ticket: FetchTicket,
        result: Result<Vec<NormalizedReportRow>, String>,
    },
    ChartLoaded {
        ticket: FetchTicket,
        result: Result<Vec<ChartPoint>, String>,
    },
}

/// Main application state.
pub struct App {
    // Runtime and backend
    pub rt: tokio::runtime::Runtime,
    pub client: ReportClient,
    ctx: egui::Context,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Report section
    pub filter: FilterState,
    pub filter_form: FilterForm,
    pub report: Feed<NormalizedReportRow>,
    pub has_searched: bool,

    // Manpower section
    pub manpower_date: NaiveDate,
    pub manpower_requested: Option<NaiveDate>,
    pub manpower: Feed<NormalizedReportRow>,

    // Chart section
    pub chart: ChartState,
    pub chart_endpoint_input: String,

    // Configuration
    pub config: AppConfig,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        ctx: egui::Context,
        config: AppConfig,
        client: ReportClient,
        rt: tokio::runtime::Runtime,
        startup_error: Option<String>,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        ctx.set_fonts(fonts);

        let (tx, rx) = mpsc::unbounded_channel();
        let filter = FilterState::new();
        let filter_form = FilterForm::new(filter.current());
        let chart_endpoint = config.chart.endpoint.clone();

        let mut app = Self {
            rt,
            client,
            ctx,
            tx,
            rx,
            current_panel: Panel::default(),
            filter,
            filter_form,
            report: Feed::new(),
            has_searched: false,
            manpower_date: Local::now().date_naive(),
            manpower_requested: None,
            manpower: Feed::new(),
            chart: ChartState::new(chart_endpoint.clone()),
            chart_endpoint_input: chart_endpoint,
            config,
            error_message: startup_error,
            success_message: None,
        };

        // Department choices are loaded once per form
        app.load_departments();

        app
    }

    /// Run `task` on the runtime and deliver its message to the UI thread.
    fn spawn_message<F>(&self, task: F)
    where
        F: Future<Output = UiMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        self.rt.spawn(async move {
            let message = task.await;
            let _ = tx.send(message);
            ctx.request_repaint();
        });
    }

    /// Load department selector options.
    pub fn load_departments(&mut self) {
        self.filter_form.loading_departments = true;
        let client = self.client.clone();

        self.spawn_message(async move { UiMessage::DepartmentsLoaded(load_department_options(&client).await) });
    }

    /// Commit a filter selection and fetch the report for it.
    pub fn search(&mut self, selection: FilterSelection) {
        let selection = self.filter.submit(selection).clone();
        let ticket = self.report.begin();
        self.has_searched = true;
        let client = self.client.clone();

        self.spawn_message(async move {
            let result = client.fetch_report(&selection).await.map_err(|e| e.log_message());
            UiMessage::ReportLoaded { ticket, result }
        });
    }

    /// Load the manpower summary for the selected date.
    pub fn load_manpower(&mut self) {
        let date = self.manpower_date;
        self.manpower_requested = Some(date);
        let ticket = self.manpower.begin();
        let client = self.client.clone();

        self.spawn_message(async move {
            let result = client
                .fetch_department_summary(date)
                .await
                .map_err(|e| e.log_message());
            UiMessage::ManpowerLoaded { ticket, result }
        });
    }

    /// Load chart data for the current endpoint.
    pub fn load_chart(&mut self) {
        let (ticket, endpoint) = self.chart.begin_fetch();
        info!("Loading chart data from {endpoint}");
        let client = self.client.clone();

        self.spawn_message(async move {
            let result = client.fetch_chart(&endpoint).await.map_err(|e| e.log_message());
            UiMessage::ChartLoaded { ticket, result }
        });
    }

    /// Export the displayed report rows to CSV.
    pub fn export_report(&mut self) {
        let rows = self.report.rows();
        if rows.is_empty() {
            self.error_message = Some("No report data to export".to_string());
            return;
        }

        let Some(path) = export::show_save_dialog(&self.config.export.file_name) else {
            return;
        };

        match export::export_rows_to_csv(rows, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.error_message = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::DepartmentsLoaded(departments) => {
                    self.filter_form.set_departments(departments);
                }
                UiMessage::ReportLoaded { ticket, result } => {
                    self.report.complete(ticket, result);
                }
                UiMessage::ManpowerLoaded { ticket, result } => {
                    self.manpower.complete(ticket, result);
                }
                UiMessage::ChartLoaded { ticket, result } => {
                    self.chart.complete(ticket, result);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.report.is_loading()
            || self.manpower.is_loading()
            || self.chart.is_loading()
            || self.filter_form.loading_departments
    }

    /// Render navigation bar.
    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for panel in Panel::ALL {
                    let text = format!("{} {}", panel.icon(), panel.name());
                    if ui.selectable_label(self.current_panel == panel, text).clicked() {
                        self.current_panel = panel;
                    }
                    ui.add_space(10.0);
                }
            });
            ui.add_space(4.0);
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, format!("Backend: {}", self.client.base_url()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_busy() {
                            ui.spinner();
                            ui.label("Loading...");
                        } else if self.has_searched {
                            ui.label(format!("{} report rows", self.report.rows().len()));
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Report => report_panel::show(self, ui),
            Panel::Manpower => manpower_panel::show(self, ui),
            Panel::Chart => chart_panel::show(self, ui),
        });
    }
}

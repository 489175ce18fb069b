//! Report filter form: date, department, and scan status.

use eframe::egui::{self, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::MAGNIFYING_GLASS;

use crate::models::{DepartmentOption, FilterSelection, ScanStatus};

use super::components::primary_button_with_icon;

/// Editable filter values and the department choices.
///
/// Edits stay in `draft` until the form is submitted.
pub struct FilterForm {
    pub draft: FilterSelection,
    pub departments: Vec<DepartmentOption>,
    pub loading_departments: bool,
}

impl FilterForm {
    pub fn new(initial: &FilterSelection) -> Self {
        Self {
            draft: initial.clone(),
            departments: Vec::new(),
            loading_departments: true,
        }
    }

    /// Replace the department choices once loaded.
    pub fn set_departments(&mut self, departments: Vec<DepartmentOption>) {
        self.departments = departments;
        self.loading_departments = false;
    }

    /// Caption of the department selector.
    fn department_text(&self) -> String {
        if self.loading_departments {
            return "Loading departments...".to_string();
        }
        self.departments
            .iter()
            .find(|d| d.code == self.draft.department_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "All Departments".to_string())
    }
}

/// Show the filter form.
///
/// Returns the submitted selection when the search button was clicked.
pub fn show(form: &mut FilterForm, ui: &mut Ui) -> Option<FilterSelection> {
    let mut submitted = None;
    let department_text = form.department_text();

    ui.horizontal(|ui| {
        ui.label("Date:");
        ui.add(DatePickerButton::new(&mut form.draft.date).id_salt("report_date"));

        ui.add_space(20.0);

        ui.label("Department:");
        ui.add_enabled_ui(!form.loading_departments, |ui| {
            egui::ComboBox::from_id_salt("report_dept_filter")
                .width(200.0)
                .selected_text(department_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut form.draft.department_id, String::new(), "All Departments");
                    for dept in &form.departments {
                        ui.selectable_value(&mut form.draft.department_id, dept.code.clone(), &dept.name);
                    }
                });
        });

        ui.add_space(20.0);

        ui.label("Status:");
        egui::ComboBox::from_id_salt("report_scan_status")
            .width(140.0)
            .selected_text(form.draft.scan_status.label())
            .show_ui(ui, |ui| {
                for status in ScanStatus::ALL {
                    ui.selectable_value(&mut form.draft.scan_status, status, status.label());
                }
            });

        ui.add_space(20.0);

        if primary_button_with_icon(ui, MAGNIFYING_GLASS, "Search").clicked() {
            submitted = Some(form.draft.clone());
        }
    });

    submitted
}

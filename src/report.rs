//! Attendance report pipeline: committed filters, department options, and
//! the column layout of the report table.

use tracing::{info, warn};

use crate::client::ReportClient;
use crate::models::{DepartmentOption, FilterSelection, NormalizedReportRow, ScanStatus, department_options};

/// Holds the committed filter selection.
///
/// The selection only changes through [`FilterState::submit`]; every submit
/// is one report fetch.
#[derive(Debug, Default)]
pub struct FilterState {
    current: FilterSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FilterSelection {
        &self.current
    }

    /// Replace the committed selection and return it for fetching.
    pub fn submit(&mut self, selection: FilterSelection) -> &FilterSelection {
        info!(
            "Report search: date={}, department={:?}, status={}",
            selection.date_param(),
            selection.department_id,
            selection.scan_status.as_str()
        );
        self.current = selection;
        &self.current
    }
}

/// Report table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    WorkDate,
    DeptCode,
    DeptName,
    DeptSbu,
    DeptStd,
    Scan,
    NoScan,
    Person,
}

impl ReportColumn {
    /// Column header text.
    pub fn header(&self) -> &'static str {
        match self {
            ReportColumn::WorkDate => "workdate",
            ReportColumn::DeptCode => "deptcode",
            ReportColumn::DeptName => "deptname",
            ReportColumn::DeptSbu => "deptsbu",
            ReportColumn::DeptStd => "deptstd",
            ReportColumn::Scan => "Scan",
            ReportColumn::NoScan => "No Scan",
            ReportColumn::Person => "Person",
        }
    }

    /// Cell text for a row.
    pub fn cell(&self, row: &NormalizedReportRow) -> String {
        match self {
            ReportColumn::WorkDate => row.workdate.clone(),
            ReportColumn::DeptCode => row.deptcode.to_string(),
            ReportColumn::DeptName => row.deptname.clone(),
            ReportColumn::DeptSbu => row.deptsbu.clone(),
            ReportColumn::DeptStd => row.deptstd.clone(),
            ReportColumn::Scan => row.countscan.to_string(),
            ReportColumn::NoScan => row.countnotscan.to_string(),
            ReportColumn::Person => row.countperson.to_string(),
        }
    }
}

/// Columns shown for a scan status filter.
///
/// Filtering on not-scanned hides the scan count and vice versa.
pub fn visible_columns(status: ScanStatus) -> Vec<ReportColumn> {
    let mut columns = vec![
        ReportColumn::WorkDate,
        ReportColumn::DeptCode,
        ReportColumn::DeptName,
        ReportColumn::DeptSbu,
        ReportColumn::DeptStd,
    ];
    if status != ScanStatus::NotScanned {
        columns.push(ReportColumn::Scan);
    }
    if status != ScanStatus::Scanned {
        columns.push(ReportColumn::NoScan);
    }
    columns.push(ReportColumn::Person);
    columns
}

/// Columns of the manpower summary table (no work date, all counts).
pub fn manpower_columns() -> Vec<ReportColumn> {
    vec![
        ReportColumn::DeptCode,
        ReportColumn::DeptName,
        ReportColumn::DeptSbu,
        ReportColumn::DeptStd,
        ReportColumn::Scan,
        ReportColumn::NoScan,
        ReportColumn::Person,
    ]
}

/// Render identity of a row. The index makes duplicate business keys distinct.
pub fn row_key(row: &NormalizedReportRow, index: usize) -> String {
    let employee = if row.employee_id.is_empty() {
        "noempid"
    } else {
        row.employee_id.as_str()
    };
    format!("{}-{}-{}-{}", row.deptcode, row.workdate, employee, index)
}

/// Detail report URL for a row, `None` when the row has no employee.
pub fn detail_url(base_url: &str, detail_path: &str, row: &NormalizedReportRow) -> Option<String> {
    if !row.has_employee() {
        return None;
    }
    let path = detail_path.trim_end_matches('/');
    Some(format!("{base_url}{path}/{id}", id = row.employee_id))
}

/// Load department selector options.
///
/// Failures are logged and yield no options; the selector then only offers
/// "all departments".
pub async fn load_department_options(client: &ReportClient) -> Vec<DepartmentOption> {
    match client.fetch_manpower().await {
        Ok(rows) => {
            let options = department_options(&rows);
            info!("Loaded {} departments from {} rows", options.len(), rows.len());
            options
        }
        Err(e) => {
            warn!("Failed to load departments: {e}");
            Vec::new()
        }
    }
}

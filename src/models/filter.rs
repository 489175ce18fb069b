//! Report filter selection.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Scan status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    #[default]
    All,
    Scanned,
    NotScanned,
}

impl ScanStatus {
    /// All choices in selector order.
    pub const ALL: [ScanStatus; 3] = [ScanStatus::All, ScanStatus::Scanned, ScanStatus::NotScanned];

    /// Value sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::All => "all",
            ScanStatus::Scanned => "scanned",
            ScanStatus::NotScanned => "not_scanned",
        }
    }

    /// Get the display name for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            ScanStatus::All => "All",
            ScanStatus::Scanned => "Scanned",
            ScanStatus::NotScanned => "Not scanned",
        }
    }
}

/// Filters applied to the attendance report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub date: NaiveDate,
    /// Department code; empty means all departments.
    pub department_id: String,
    pub scan_status: ScanStatus,
}

impl FilterSelection {
    /// Today's report across all departments and statuses.
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            department_id: String::new(),
            scan_status: ScanStatus::All,
        }
    }

    /// Date formatted for the wire (`YYYY-MM-DD`).
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = FilterSelection::default();
        assert_eq!(selection.date, Local::now().date_naive());
        assert!(selection.department_id.is_empty());
        assert_eq!(selection.scan_status, ScanStatus::All);
    }

    #[test]
    fn test_scan_status_wire_values() {
        assert_eq!(ScanStatus::All.as_str(), "all");
        assert_eq!(ScanStatus::Scanned.as_str(), "scanned");
        assert_eq!(ScanStatus::NotScanned.as_str(), "not_scanned");

        let parsed: ScanStatus = serde_json::from_str("\"not_scanned\"").unwrap();
        assert_eq!(parsed, ScanStatus::NotScanned);
    }

    #[test]
    fn test_date_param_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(FilterSelection::for_date(date).date_param(), "2024-01-05");
    }
}

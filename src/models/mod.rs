//! Data models for report rows, filters, departments, and chart points.

pub mod chart;
pub mod department;
pub mod filter;
pub mod report;

pub use chart::ChartPoint;
pub use department::{DepartmentOption, department_options};
pub use filter::{FilterSelection, ScanStatus};
pub use report::{NormalizedReportRow, REPORT_FIELDS, RawReportRow};

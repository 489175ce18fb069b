//! CSV export of the displayed report rows.

use crate::error::Result;
use crate::models::{NormalizedReportRow, REPORT_FIELDS};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name offered when exporting the report.
pub const DEFAULT_FILE_NAME: &str = "attendance_report.csv";

/// Write rows as CSV: a header of field names, then one line per row.
pub fn write_csv<W: Write>(rows: &[NormalizedReportRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(REPORT_FIELDS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export rows to a CSV file at `path`.
pub fn export_rows_to_csv(rows: &[NormalizedReportRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, std::io::BufWriter::new(file))?;
    tracing::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("CSV Files", &["csv"])
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> NormalizedReportRow {
        NormalizedReportRow {
            workdate: "2024-01-01".to_string(),
            groupid: "G1".to_string(),
            groupname: "Line, North".to_string(),
            deptcode: 1,
            deptname: "Cutting".to_string(),
            deptsbu: "SBU1".to_string(),
            deptstd: "STD".to_string(),
            countscan: 10,
            countnotscan: 2,
            countperson: 12,
            employee_id: "E001".to_string(),
            late: Some(1),
        }
    }

    fn to_string(rows: &[NormalizedReportRow]) -> String {
        let mut buffer = Vec::new();
        write_csv(rows, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_first_line() {
        let output = to_string(&[sample_row()]);
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("workdate,groupid,groupname,deptcode,deptname,deptsbu,deptstd,countscan,countnotscan,countperson,employeeId,late")
        );
        assert_eq!(
            lines.next(),
            Some("2024-01-01,G1,\"Line, North\",1,Cutting,SBU1,STD,10,2,12,E001,1")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_missing_late_is_empty_cell() {
        let mut row = sample_row();
        row.late = None;
        row.employee_id.clear();

        let output = to_string(&[row]);
        let line = output.lines().nth(1).unwrap();
        assert!(line.ends_with(",12,,"));
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        let output = to_string(&[]);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let path = std::env::temp_dir().join("attendance-dashboard-export-test.csv");
        export_rows_to_csv(&[sample_row(), sample_row()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        let _ = std::fs::remove_file(&path);
    }
}

//! Attendance report rows as returned by the backend and as displayed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Report row exactly as the backend sends it.
///
/// Every field is optional and loosely typed: the backend mixes strings,
/// numbers and nulls for the same column depending on the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReportRow {
    pub workdate: Option<Value>,
    pub groupid: Option<Value>,
    pub groupname: Option<Value>,
    pub deptcode: Option<Value>,
    pub deptname: Option<Value>,
    pub deptsbu: Option<Value>,
    pub deptstd: Option<Value>,
    pub countscan: Option<Value>,
    pub countnotscan: Option<Value>,
    pub countperson: Option<Value>,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<Value>,
    pub late: Option<Value>,

    // Backend-internal, carried but unused.
    pub deptcodelevel1: Option<Value>,
    pub deptcodelevel2: Option<Value>,
    pub deptcodelevel3: Option<Value>,
    pub deptcodelevel4: Option<Value>,
    pub parentcode: Option<Value>,
    #[serde(rename = "PersonType")]
    pub person_type: Option<Value>,
    #[serde(rename = "PersonGroup")]
    pub person_group: Option<Value>,
}

/// Display-ready report row.
///
/// Field order is the CSV column order. `countperson` is taken from the
/// backend as-is and is not required to equal `countscan + countnotscan`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedReportRow {
    pub workdate: String,
    pub groupid: String,
    pub groupname: String,
    pub deptcode: u64,
    pub deptname: String,
    pub deptsbu: String,
    pub deptstd: String,
    pub countscan: u64,
    pub countnotscan: u64,
    pub countperson: u64,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    pub late: Option<u64>,
}

/// Column names of [`NormalizedReportRow`] in declared order.
pub const REPORT_FIELDS: [&str; 12] = [
    "workdate",
    "groupid",
    "groupname",
    "deptcode",
    "deptname",
    "deptsbu",
    "deptstd",
    "countscan",
    "countnotscan",
    "countperson",
    "employeeId",
    "late",
];

impl NormalizedReportRow {
    /// Whether the row can link to a per-employee detail report.
    pub fn has_employee(&self) -> bool {
        !self.employee_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_accepts_mixed_types() {
        let json = r#"{
            "deptcode": 1203,
            "deptname": "Assembly",
            "countscan": "12",
            "parentcode": null,
            "PersonType": "Daily",
            "unknownField": true
        }"#;
        let row: RawReportRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.deptcode, Some(Value::from(1203)));
        assert_eq!(row.countscan, Some(Value::from("12")));
        assert_eq!(row.parentcode, None);
        assert_eq!(row.person_type, Some(Value::from("Daily")));
        assert!(row.workdate.is_none());
    }

    #[test]
    fn test_raw_row_employee_id_rename() {
        let row: RawReportRow = serde_json::from_str(r#"{"employeeId": "E001"}"#).unwrap();
        assert_eq!(row.employee_id, Some(Value::from("E001")));
    }

    #[test]
    fn test_serialized_field_order_matches_constant() {
        let row = NormalizedReportRow::default();
        let value = serde_json::to_value(&row).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), REPORT_FIELDS.len());
        for field in REPORT_FIELDS {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }
}

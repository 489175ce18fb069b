//! Coercion of loosely typed backend rows into display rows.

use serde_json::Value;

use crate::models::report::{NormalizedReportRow, RawReportRow};

/// Normalize backend rows, one output row per input row, same order.
pub fn normalize(raw: &[RawReportRow]) -> Vec<NormalizedReportRow> {
    raw.iter().map(NormalizedReportRow::from).collect()
}

impl From<&RawReportRow> for NormalizedReportRow {
    fn from(raw: &RawReportRow) -> Self {
        Self {
            workdate: text(raw.workdate.as_ref()),
            groupid: text(raw.groupid.as_ref()),
            groupname: text(raw.groupname.as_ref()),
            deptcode: count(raw.deptcode.as_ref()),
            deptname: text(raw.deptname.as_ref()),
            deptsbu: text(raw.deptsbu.as_ref()),
            deptstd: text(raw.deptstd.as_ref()),
            countscan: count(raw.countscan.as_ref()),
            countnotscan: count(raw.countnotscan.as_ref()),
            countperson: count(raw.countperson.as_ref()),
            employee_id: text(raw.employee_id.as_ref()),
            late: Some(count(raw.late.as_ref())),
        }
    }
}

/// Text value of a loose field ("" for missing or null).
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Non-negative integer value of a loose field, 0 when absent or invalid.
pub fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => parse_count(s),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                v
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
                    _ => 0,
                }
            }
        }
        _ => 0,
    }
}

/// Parse the leading base-10 digits of `s` ("12" → 12, "7 people" → 7, "abc" → 0).
///
/// Negative values and overflow yield 0.
pub fn parse_count(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<u64>().unwrap_or(0)
}

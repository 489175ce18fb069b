//! Department selector options.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::report::RawReportRow;
use crate::normalize::text;

/// One entry of the department selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentOption {
    pub code: String,
    pub name: String,
}

/// Distinct `(deptcode, deptname)` pairs in order of first occurrence.
///
/// Rows missing either value are skipped; later rows repeating a code are
/// ignored even when their name differs.
pub fn department_options(rows: &[RawReportRow]) -> Vec<DepartmentOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();

    for row in rows {
        let code = text(row.deptcode.as_ref());
        let name = text(row.deptname.as_ref());
        if code.is_empty() || name.is_empty() {
            continue;
        }
        if seen.insert(code.clone()) {
            options.push(DepartmentOption { code, name });
        }
    }

    options
}

//! Department chart data points.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::normalize::{count, text};

/// Scanned/not-scanned head count of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(default, deserialize_with = "loose_text")]
    pub deptcode: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub department: String,
    #[serde(default, deserialize_with = "loose_count")]
    pub scanned_count: u64,
    #[serde(default, deserialize_with = "loose_count")]
    pub not_scanned_count: u64,
}

impl ChartPoint {
    /// Height of the stacked bar.
    pub fn total(&self) -> u64 {
        self.scanned_count.saturating_add(self.not_scanned_count)
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(text(value.as_ref()))
}

fn loose_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(count(value.as_ref()))
}

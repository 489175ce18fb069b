//! Attendance backend HTTP client.

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{ChartPoint, FilterSelection, NormalizedReportRow, RawReportRow};
use crate::normalize::normalize;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode, cookie::Jar};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const REPORT_PATH: &str = "/api/attendance/report";
const MANPOWER_PATH: &str = "/api/manpower";
const DEPARTMENT_PATH: &str = "/api/department";

const REPORT_FALLBACK: &str = "Failed to fetch report data";
const MANPOWER_FALLBACK: &str = "Failed to fetch departments";
const DEPARTMENT_FALLBACK: &str = "Failed to fetch employees";
const CHART_FALLBACK: &str = "Failed to fetch data";

/// Attendance backend client.
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Clone)]
pub struct ReportClient {
    client: Client,
    base_url: String,
    status_param: String,
}

/// Error body returned with non-success statuses.
#[derive(Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

impl ReportClient {
    /// Create a new client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(jar);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            status_param: config.status_param.clone(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an absolute URL or a path relative to the base URL.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{base}{endpoint}", base = self.base_url)
        } else {
            format!("{base}/{endpoint}", base = self.base_url)
        }
    }

    /// Query pairs for the report endpoint.
    pub fn report_query(&self, selection: &FilterSelection) -> Vec<(String, String)> {
        vec![
            ("date".to_string(), selection.date_param()),
            ("departmentId".to_string(), selection.department_id.clone()),
            (self.status_param.clone(), selection.scan_status.as_str().to_string()),
        ]
    }

    /// Fetch and normalize the filtered attendance report.
    pub async fn fetch_report(&self, selection: &FilterSelection) -> Result<Vec<NormalizedReportRow>> {
        let url = self.resolve(REPORT_PATH);
        let query = self.report_query(selection);
        let raw: Vec<RawReportRow> = self.get_json(&url, &query, REPORT_FALLBACK).await?;
        Ok(normalize(&raw))
    }

    /// Fetch the unfiltered manpower listing.
    pub async fn fetch_manpower(&self) -> Result<Vec<RawReportRow>> {
        let url = self.resolve(MANPOWER_PATH);
        self.get_json(&url, &[], MANPOWER_FALLBACK).await
    }

    /// Fetch the per-department manpower summary for one day.
    pub async fn fetch_department_summary(&self, date: NaiveDate) -> Result<Vec<NormalizedReportRow>> {
        let url = self.resolve(DEPARTMENT_PATH);
        let query = [("date".to_string(), date.format("%Y-%m-%d").to_string())];
        let raw: Vec<RawReportRow> = self.get_json(&url, &query, DEPARTMENT_FALLBACK).await?;
        Ok(normalize(&raw))
    }

    /// Fetch chart data from a caller-supplied endpoint.
    pub async fn fetch_chart(&self, endpoint: &str) -> Result<Vec<ChartPoint>> {
        let url = self.resolve(endpoint);
        self.get_json(&url, &[], CHART_FALLBACK).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
        fallback: &str,
    ) -> Result<Vec<T>> {
        debug!("GET {url} {query:?}");
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_rows(status, &body, fallback)
    }
}

/// Decode a JSON array response, mapping non-success statuses to API errors.
///
/// The error message comes from the payload's `error` field when present and
/// non-empty, else `fallback`.
pub fn decode_rows<T: DeserializeOwned>(status: StatusCode, body: &str, fallback: &str) -> Result<Vec<T>> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|p| p.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(AppError::api(status.as_u16(), message));
    }

    serde_json::from_str(body).map_err(|e| AppError::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanStatus;

    fn client() -> ReportClient {
        ReportClient::new(&ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_endpoints() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.resolve("/api/manpower"), "http://localhost:3000/api/manpower");
        assert_eq!(client.resolve("api/chart"), "http://localhost:3000/api/chart");
        assert_eq!(client.resolve("https://other.host/x"), "https://other.host/x");
    }

    #[test]
    fn test_report_query_uses_status_alias() {
        let client = client();
        let selection = FilterSelection {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            department_id: "1203".to_string(),
            scan_status: ScanStatus::NotScanned,
        };
        let query = client.report_query(&selection);

        assert_eq!(
            query,
            vec![
                ("date".to_string(), "2024-03-01".to_string()),
                ("departmentId".to_string(), "1203".to_string()),
                ("employeeId".to_string(), "not_scanned".to_string()),
            ]
        );
    }

    #[test]
    fn test_report_query_custom_status_param() {
        let client = ReportClient::new(&ApiConfig {
            status_param: "scanStatus".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        let query = client.report_query(&FilterSelection::today());

        assert_eq!(query[1], ("departmentId".to_string(), String::new()));
        assert_eq!(query[2], ("scanStatus".to_string(), "all".to_string()));
    }

    #[test]
    fn test_decode_error_payload() {
        let result = decode_rows::<RawReportRow>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "db down"}"#,
            REPORT_FALLBACK,
        );

        match result {
            Err(AppError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_fallback_message() {
        for body in ["", "<html>oops</html>", r#"{"error": ""}"#, r#"{"detail": "x"}"#] {
            let result = decode_rows::<RawReportRow>(StatusCode::BAD_GATEWAY, body, REPORT_FALLBACK);
            match result {
                Err(AppError::Api { message, .. }) => assert_eq!(message, REPORT_FALLBACK),
                other => panic!("expected API error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_empty_array() {
        let rows = decode_rows::<RawReportRow>(StatusCode::OK, "[]", REPORT_FALLBACK).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_decode_non_array_is_malformed() {
        let result = decode_rows::<RawReportRow>(StatusCode::OK, r#"{"rows": []}"#, REPORT_FALLBACK);
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}

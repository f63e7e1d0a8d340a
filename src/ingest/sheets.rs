/// Spreadsheet values API client.
///
/// Handles URL construction and JSON envelope parsing for the tabular
/// store holding the sensor readings:
///   https://sheets.googleapis.com/v4/spreadsheets/{id}/values/{range}
///
/// The station appends one row per reading; the configured range covers
/// the two data columns only (distance, flow-rate). See `fixtures.rs`
/// for annotated examples of the response envelope.
///
/// Absence of fresh data — a non-success status, a missing `values`
/// field, an unparseable body — is a normal operating condition here,
/// not a fault: the fetch path collapses all of it into zero available
/// rows and lets the pipeline report "not enough data" for this request.
/// The next request fetches fresh; there are no retries and no caching.

use crate::config::SheetsConfig;
use crate::model::RawRow;
use crate::service::ReadingSource;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde structures for the values API envelope
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ValuesResponse {
    /// Omitted entirely by the API when the range holds no data.
    values: Option<Vec<RawRow>>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SheetsError {
    /// Transport-level failure reaching the values API.
    RequestFailed(String),
    /// Malformed or unexpected JSON envelope.
    ParseError(String),
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::RequestFailed(reason) => {
                write!(f, "values API request failed: {}", reason)
            }
            SheetsError::ParseError(reason) => {
                write!(f, "values API response was not valid: {}", reason)
            }
        }
    }
}

impl std::error::Error for SheetsError {}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

const VALUES_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Builds a values API URL for the given spreadsheet, A1 range, and API
/// key. The range is percent-encoded — A1 notation contains `!` and `:`,
/// which are not safe in a path segment.
pub fn build_values_url(spreadsheet_id: &str, range: &str, api_key: &str) -> String {
    format!(
        "{}/{}/values/{}?key={}",
        VALUES_API_BASE,
        spreadsheet_id,
        urlencoding::encode(range),
        api_key
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a values API JSON response body into raw rows, in the store's
/// append order (oldest first). A missing `values` field means the range
/// holds no data and yields an empty list, not an error.
///
/// # Errors
/// - `SheetsError::ParseError` — the body is not the expected envelope.
pub fn parse_values_response(json: &str) -> Result<Vec<RawRow>, SheetsError> {
    let response: ValuesResponse = serde_json::from_str(json)
        .map_err(|e| SheetsError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    Ok(response.values.unwrap_or_default())
}

/// Trims a full row list down to the trailing window the pipeline uses:
/// up to the two most recent rows, still oldest-first. Zero and one-row
/// stores pass through as-is.
pub fn latest_window(rows: Vec<RawRow>) -> Vec<RawRow> {
    let start = rows.len().saturating_sub(2);
    rows[start..].to_vec()
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Issues one blocking GET against the values API and parses the body.
/// A non-success status is zero rows, not an error.
pub fn fetch_values(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<RawRow>, SheetsError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| SheetsError::RequestFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Ok(Vec::new());
    }

    let body = response
        .text()
        .map_err(|e| SheetsError::RequestFailed(e.to_string()))?;

    parse_values_response(&body)
}

// ---------------------------------------------------------------------------
// ReadingSource implementation
// ---------------------------------------------------------------------------

/// The production reading source: one fresh network round trip per call.
pub struct SheetsSource {
    client: reqwest::blocking::Client,
    spreadsheet_id: String,
    range: String,
    api_key: String,
}

impl SheetsSource {
    pub fn new(config: &SheetsConfig, api_key: String) -> SheetsSource {
        SheetsSource {
            client: reqwest::blocking::Client::new(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
            api_key,
        }
    }
}

impl ReadingSource for SheetsSource {
    fn fetch_latest(&self) -> Vec<RawRow> {
        let url = build_values_url(&self.spreadsheet_id, &self.range, &self.api_key);

        match fetch_values(&self.client, &url) {
            Ok(rows) => latest_window(rows),
            Err(e) => {
                eprintln!("Sheets fetch failed: {}", e);
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Test fixtures: representative JSON payloads from the spreadsheet
/// values API.
///
/// These reflect the real envelope returned by:
///   https://sheets.googleapis.com/v4/spreadsheets/{id}/values/{range}?key=...
///
/// Values API response shape:
///   response.range          — the resolved A1 range (informational)
///   response.majorDimension — always "ROWS" for our requests
///   response.values[]       — ordered rows, oldest first (append order);
///                             each row an ordered array of STRING cells
///
/// Note: cell values are always JSON strings in the formatted-value
/// rendering, even when they represent numbers. Parsers must handle this.
/// The `values` field is OMITTED ENTIRELY (not an empty array) when the
/// requested range contains no data.

/// Normal operation: several readings appended over time, two cells each
/// (Distance in column B, FlowRate in column C).
pub(crate) fn fixture_recent_readings_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS",
      "values": [
        ["14.2", "2.8"],
        ["13.0", "3.0"],
        ["12.5", "3.2"],
        ["11.0", "4.1"]
      ]
    }"#
}

/// A store that has seen exactly one reading so far.
pub(crate) fn fixture_single_reading_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS",
      "values": [
        ["9.75", "2.0"]
      ]
    }"#
}

/// Sheet exists but holds no rows: the values field is absent, which the
/// API uses instead of an empty array.
pub(crate) fn fixture_no_values_field_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS"
    }"#
}

/// Explicit empty values array — not what the live API sends for an empty
/// range, but cheap to accept.
pub(crate) fn fixture_empty_values_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS",
      "values": []
    }"#
}

/// Ragged rows: a sensor glitch wrote a partial reading (one cell), and a
/// misconfigured range picked up a third column. Ingestion passes these
/// through untouched; shape validation is the feature builder's job.
pub(crate) fn fixture_ragged_rows_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS",
      "values": [
        ["12.5", "3.2"],
        ["11.0"],
        ["10.2", "4.4", "surplus"]
      ]
    }"#
}

/// A reading whose cells are not numeric — the station wrote its error
/// markers into the data columns. Ingestion does not judge cell content.
pub(crate) fn fixture_non_numeric_cells_json() -> &'static str {
    r#"{
      "range": "Sheet1!B1:C1000",
      "majorDimension": "ROWS",
      "values": [
        ["12.5", "3.2"],
        ["ERR", "ERR"]
      ]
    }"#
}

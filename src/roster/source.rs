use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use calamine::{Reader, Xlsx};
use thiserror::Error;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use super::types::{RawRow, COL_NAME};

/// Environment variable that supplies the roster location.
pub const ENV_SOURCE_VAR: &str = "CLANBOARD_SOURCE";

/// Zip local file header; every xlsx workbook starts with it.
const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

/// Why the roster could not be retrieved at all.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {location} failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {location} timed out after {timeout:?}")]
    Timeout { location: String, timeout: Duration },

    #[error("{location} returned HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("roster is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("roster is not a readable xlsx workbook: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("not a roster: {0}")]
    Format(String),
}

/// Read the roster location from `CLANBOARD_SOURCE`.
/// Returns None when the variable is unset or blank.
pub fn get_source_from_env() -> Option<String> {
    match std::env::var(ENV_SOURCE_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch and parse the raw roster from a URL or a local file path.
///
/// The body may be CSV text or an xlsx workbook (first worksheet).
pub async fn fetch_roster(location: &str, timeout: Duration) -> Result<Vec<RawRow>, SourceError> {
    let body = if is_remote(location) {
        fetch_remote(location, timeout).await?
    } else {
        read_local(location).await?
    };

    let rows = parse_roster_bytes(&body)?;
    tracing::debug!(location, rows = rows.len(), "roster fetched");
    Ok(rows)
}

async fn fetch_remote(location: &str, timeout: Duration) -> Result<Vec<u8>, SourceError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("clanboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| SourceError::Http {
            location: location.to_string(),
            source,
        })?;

    // Up to 3 retries, 100ms, 200ms, 400ms apart
    let retry_strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .take(3);

    let attempt = || async {
        let response = client.get(location).send().await.map_err(|e| {
            tracing::warn!(location, error = %e, "roster request failed");
            classify(location, timeout, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(location, status = status.as_u16(), "roster request rejected");
            return Err(SourceError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        // A private sheet answers 200 with a sign-in page
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"));
        if is_html {
            return Err(SourceError::Format(format!(
                "{} returned an HTML page; is the sheet shared publicly?",
                location
            )));
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| classify(location, timeout, e))
    };

    RetryIf::spawn(retry_strategy, attempt, is_transient).await
}

/// Network failures and server errors are retried; client errors (4xx) and
/// bad content will not change on retry.
fn is_transient(error: &SourceError) -> bool {
    match error {
        SourceError::Status { status, .. } => !(400..500).contains(status),
        SourceError::Http { .. } | SourceError::Timeout { .. } => true,
        _ => false,
    }
}

fn classify(location: &str, timeout: Duration, error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout {
            location: location.to_string(),
            timeout,
        }
    } else {
        SourceError::Http {
            location: location.to_string(),
            source: error,
        }
    }
}

async fn read_local(location: &str) -> Result<Vec<u8>, SourceError> {
    tokio::fs::read(Path::new(location.trim()))
        .await
        .map_err(|source| SourceError::Io {
            location: location.to_string(),
            source,
        })
}

/// Parse a roster body, sniffing xlsx by its zip signature and treating
/// anything else as UTF-8 CSV.
pub fn parse_roster_bytes(body: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    if body.starts_with(XLSX_MAGIC) {
        return parse_roster_xlsx(body);
    }
    let text = std::str::from_utf8(body).map_err(|_| {
        SourceError::Format("body is neither UTF-8 CSV nor an xlsx workbook".to_string())
    })?;
    parse_roster_csv(text)
}

/// Parse CSV text with a header row into raw rows.
///
/// Short rows are accepted; their missing trailing cells read as absent.
/// A header without a `Name` column is rejected as [`SourceError::Format`].
pub fn parse_roster_csv(text: &str) -> Result<Vec<RawRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    check_header(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(row) = build_row(&headers, record.iter()) {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Parse the first worksheet of an xlsx workbook. Row 1 is the header.
pub fn parse_roster_xlsx(body: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(body))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::Format("workbook has no worksheets".to_string()))??;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => Vec::new(),
    };
    check_header(&headers)?;

    let rows = sheet_rows
        .filter_map(|cells| {
            let values: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            build_row(&headers, values.iter().map(String::as_str))
        })
        .collect();

    Ok(rows)
}

fn check_header(headers: &[String]) -> Result<(), SourceError> {
    let has_name = headers
        .iter()
        .any(|h| h.trim().eq_ignore_ascii_case(COL_NAME));
    if has_name {
        return Ok(());
    }

    let preview: Vec<String> = headers
        .iter()
        .take(3)
        .map(|h| h.chars().take(40).collect())
        .collect();
    Err(SourceError::Format(format!(
        "missing {} column (header starts with {:?})",
        COL_NAME, preview
    )))
}

/// Zip a record with the header; `None` when every cell is blank.
fn build_row<'a>(headers: &[String], cells: impl Iterator<Item = &'a str>) -> Option<RawRow> {
    let pairs: Vec<(&String, String)> = headers
        .iter()
        .zip(cells)
        .map(|(column, value)| (column, value.trim().to_string()))
        .collect();
    if pairs.iter().all(|(_, value)| value.is_empty()) {
        return None;
    }
    Some(RawRow::from_pairs(pairs))
}

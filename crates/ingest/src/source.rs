//! One-shot event loading at startup; the table is read-only afterwards.

use tracing::info;

use flowpath_core::config::SourceConfig;
use flowpath_core::{EventTable, FlowpathError, RowIssue};

use crate::csv::parse_csv;
use crate::table::build_table;

/// Load the event table from the configured source.
///
/// A local file override wins over the remote URL. Schema violations and
/// unreadable sources are fatal; per-row problems come back as issues.
pub async fn load_events(
    source: &SourceConfig,
) -> Result<(EventTable, Vec<RowIssue>), FlowpathError> {
    let body = match &source.events_file {
        Some(path) => {
            info!("Reading events from {}", path);
            std::fs::read_to_string(path)?
        }
        None => fetch(&source.events_url).await?,
    };

    let doc = parse_csv(&body)?;
    let (table, issues) = build_table(&doc)?;
    info!(
        "Event table ready: {} events across {} apps ({} rows excluded)",
        table.len(),
        table.app_count(),
        issues.len()
    );
    Ok((table, issues))
}

async fn fetch(url: &str) -> Result<String, FlowpathError> {
    info!("Fetching events from {}", url);
    let response = reqwest::get(url)
        .await
        .map_err(|e| FlowpathError::Http(e.to_string()))?;
    if !response.status().is_success() {
        return Err(FlowpathError::Http(format!(
            "GET {} returned {}",
            url,
            response.status()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| FlowpathError::Http(e.to_string()))
}

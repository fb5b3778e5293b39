use std::sync::Arc;

use flowpath_core::EventTable;

pub struct AppState {
    /// Read-only event table, loaded once at startup. Every request
    /// recomputes its pipeline from here; nothing is cached between requests.
    pub table: Arc<EventTable>,
    /// Source rows excluded at load time, surfaced in /health.
    pub excluded_rows: usize,
}

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub events: usize,
    pub apps: usize,
    pub excluded_rows: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        events: state.table.len(),
        apps: state.table.app_count(),
        excluded_rows: state.excluded_rows,
    })
}

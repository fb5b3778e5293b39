//! Selector endpoints: known apps and the participants seen for each.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use flowpath_core::catalog::KNOWN_APPS;

use crate::state::AppState;

#[derive(Serialize)]
pub struct AppResponse {
    pub id: &'static str,
    pub name: &'static str,
}

/// Apps available in the selector dropdown.
pub async fn apps() -> Json<Vec<AppResponse>> {
    Json(
        KNOWN_APPS
            .iter()
            .copied()
            .map(|(id, name)| AppResponse { id, name })
            .collect(),
    )
}

/// Participant ids present for an app, with the "All" option first.
/// Unknown apps just return the "All" option.
pub async fn participants(
    State(state): State<Arc<AppState>>,
    Path(app_id): Path<String>,
) -> Json<Vec<String>> {
    let mut ids = vec!["All".to_owned()];
    ids.extend(state.table.participants(&app_id).iter().cloned());
    Json(ids)
}

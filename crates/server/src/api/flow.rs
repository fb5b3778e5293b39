//! The flow-graph endpoint: runs the full extraction pipeline per request.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use flowpath_graph::{build_flow_graph, FlowGraph};
use flowpath_journey::{
    extract_journeys, JourneyKind, JourneyQuery, ParticipantFilter, StepTable,
};

use crate::api::{bad_request, ErrorResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FlowParams {
    pub app: String,
    pub participant: Option<String>,
    pub kind: Option<String>,
}

/// Compute the flow graph for an (app, participant, journey kind) selection.
///
/// The pipeline reruns from the full table on every request. A selection
/// matching nothing renders as an empty graph, not an error.
pub async fn flow(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlowParams>,
) -> Result<Json<FlowGraph>, (StatusCode, Json<ErrorResponse>)> {
    let kind = match params.kind.as_deref() {
        None => JourneyKind::default(),
        Some(raw) => JourneyKind::parse(raw)
            .ok_or_else(|| bad_request(format!("unknown journey kind: {raw}")))?,
    };
    let participant = params
        .participant
        .as_deref()
        .map(ParticipantFilter::parse)
        .unwrap_or(ParticipantFilter::All);

    let query = JourneyQuery {
        app_id: params.app,
        participant,
        kind,
    };

    let journeys = extract_journeys(&state.table, &query);
    let steps = StepTable::from_journeys(journeys);
    let graph = build_flow_graph(&steps);

    debug!(
        app = %query.app_id,
        kind = %query.kind,
        journeys = steps.row_count(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "flow graph computed"
    );

    Ok(Json(graph))
}

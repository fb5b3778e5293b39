//! Journey extraction: raw events → per-(participant, session) step sequences.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use flowpath_core::label::{NON_PURCHASE_LABEL, PURCHASE_LABEL};
use flowpath_core::EventTable;

use crate::query::JourneyQuery;

/// Delimiter joining multiple page labels inside one event cell.
pub const PAGE_DELIMITER: char = '|';

/// Recommendation impressions fire alongside real page views; dropped as noise.
pub const NOISE_LABEL: &str = "Viewedrecommendedproduct";

/// "Cart" collides with a different event class of the same name upstream,
/// so the journey pipeline renames it on entry.
const CART_RAW: &str = "Cart";
const CART_NORMALIZED: &str = "Cart Journey";

/// Journeys longer than this keep only their first and last steps.
pub const TRUNCATE_OVER: usize = 10;
pub const KEEP_HEAD: usize = 5;
pub const KEEP_TAIL: usize = 5;

/// A journey retained for rendering: ordered step labels for one
/// (participant, session), ending in a terminal label.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyRow {
    pub participant_id: String,
    pub session_id: String,
    pub steps: Vec<String>,
}

/// One atomic page view after label explosion.
struct PageView<'a> {
    participant_id: &'a str,
    session_id: &'a str,
    label: &'a str,
    timestamp: DateTime<Utc>,
}

/// Run the full extraction pipeline for one filter selection.
///
/// Filters to the requested app/participant, explodes delimited labels,
/// drops noise, normalizes "Cart", orders chronologically, groups per
/// (participant, session), reduces each group to its journey until the
/// first purchase, appends the non-purchase terminal where needed, drops
/// trivial journeys, truncates long ones, and keeps only the requested
/// outcome class.
pub fn extract_journeys(table: &EventTable, query: &JourneyQuery) -> Vec<JourneyRow> {
    let mut views = explode(table, query);

    // Strict global order compatible with a stable per-(participant, session)
    // chronology; session breaks ties between simultaneous events.
    views.sort_by(|a, b| {
        (a.participant_id, a.timestamp, a.session_id).cmp(&(
            b.participant_id,
            b.timestamp,
            b.session_id,
        ))
    });

    let mut groups: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    for view in &views {
        groups
            .entry((view.participant_id, view.session_id))
            .or_default()
            .push(view.label);
    }

    let mut rows = Vec::new();
    for ((participant_id, session_id), labels) in groups {
        let mut steps = collapse_until_first_purchase(&labels);
        if steps.last().map(String::as_str) != Some(PURCHASE_LABEL) {
            steps.push(NON_PURCHASE_LABEL.to_owned());
        }
        // A lone terminal label carries no transition.
        if steps.len() <= 1 {
            continue;
        }
        let steps = truncate_head_tail(steps);
        let last = steps.last().map(String::as_str).unwrap_or_default();
        if !query.kind.matches_final(last) {
            continue;
        }
        rows.push(JourneyRow {
            participant_id: participant_id.to_owned(),
            session_id: session_id.to_owned(),
            steps,
        });
    }

    debug!(
        app = %query.app_id,
        kind = %query.kind,
        views = views.len(),
        journeys = rows.len(),
        "journeys extracted"
    );
    rows
}

/// Filter to the selection and expand one event into one row per atomic label.
fn explode<'a>(table: &'a EventTable, query: &JourneyQuery) -> Vec<PageView<'a>> {
    let mut views = Vec::new();
    for event in table.events() {
        if event.app_id != query.app_id || !query.participant.matches(&event.participant_id) {
            continue;
        }
        for raw in event.page_type.split(PAGE_DELIMITER) {
            if raw == NOISE_LABEL {
                continue;
            }
            let label = if raw == CART_RAW { CART_NORMALIZED } else { raw };
            views.push(PageView {
                participant_id: &event.participant_id,
                session_id: &event.session_id,
                label,
                timestamp: event.timestamp,
            });
        }
    }
    views
}

/// Collapse consecutive duplicate labels and cut the sequence just after its
/// first purchase; everything a participant did past the purchase is
/// irrelevant to the funnel.
fn collapse_until_first_purchase(labels: &[&str]) -> Vec<String> {
    let mut journey: Vec<String> = Vec::new();
    let Some(first) = labels.first() else {
        return journey;
    };
    journey.push((*first).to_owned());

    for label in &labels[1..] {
        if *label == PURCHASE_LABEL {
            journey.push((*label).to_owned());
            break;
        }
        if journey.last().map(String::as_str) != Some(*label) {
            journey.push((*label).to_owned());
        }
    }
    journey
}

/// Keep only the first and last steps of long journeys, for display economy.
fn truncate_head_tail(steps: Vec<String>) -> Vec<String> {
    if steps.len() <= TRUNCATE_OVER {
        return steps;
    }
    let tail_start = steps.len() - KEEP_TAIL;
    let mut kept = steps[..KEEP_HEAD].to_vec();
    kept.extend_from_slice(&steps[tail_start..]);
    kept
}

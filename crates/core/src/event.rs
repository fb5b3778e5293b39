use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single page-view event from the source table.
///
/// `page_type` may hold several labels joined by '|'; splitting happens in
/// the journey pipeline, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub participant_id: String,
    pub session_id: String,
    pub app_id: String,
    pub page_type: String,
    pub timestamp: DateTime<Utc>,
}

/// Why a source row was excluded from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The event time could not be parsed in any accepted format.
    BadTimestamp,
    /// The row has fewer cells than the header declares.
    ShortRow,
}

/// A source row excluded from computation.
///
/// Excluded rows are reported rather than silently mis-sorted — a row with a
/// broken timestamp cannot participate in chronological ordering.
#[derive(Debug, Clone, Serialize)]
pub struct RowIssue {
    /// 1-based line number in the source file (the header is line 1).
    pub line: usize,
    pub kind: IssueKind,
    /// The offending cell value (or the whole row for structural issues).
    pub value: String,
}

/// The full event table, loaded once per process and read-only thereafter.
///
/// Shared behind an `Arc`; every filter-selection change recomputes the
/// pipeline from this table, nothing else persists between requests.
#[derive(Debug)]
pub struct EventTable {
    events: Vec<Event>,
    participants_by_app: HashMap<String, Vec<String>>,
}

impl EventTable {
    pub fn new(events: Vec<Event>) -> Self {
        let mut participants_by_app: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for event in &events {
            let key = (event.app_id.clone(), event.participant_id.clone());
            if seen.insert(key) {
                participants_by_app
                    .entry(event.app_id.clone())
                    .or_default()
                    .push(event.participant_id.clone());
            }
        }
        for ids in participants_by_app.values_mut() {
            sort_participant_ids(ids);
        }
        Self {
            events,
            participants_by_app,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sorted participant ids observed for an app; empty for unknown apps.
    pub fn participants(&self, app_id: &str) -> &[String] {
        self.participants_by_app
            .get(app_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct app packages observed in the data.
    pub fn app_count(&self) -> usize {
        self.participants_by_app.len()
    }
}

/// Order ids numerically when they parse as integers, lexicographically
/// otherwise (numeric ids first).
pub fn sort_participant_ids(ids: &mut [String]) {
    ids.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(app: &str, participant: &str) -> Event {
        Event {
            participant_id: participant.to_owned(),
            session_id: "s1".to_owned(),
            app_id: app.to_owned(),
            page_type: "Home".to_owned(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut ids = vec!["10".to_owned(), "2".to_owned(), "1".to_owned()];
        sort_participant_ids(&mut ids);
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn non_numeric_ids_sort_after_numeric() {
        let mut ids = vec!["abc".to_owned(), "7".to_owned()];
        sort_participant_ids(&mut ids);
        assert_eq!(ids, vec!["7", "abc"]);
    }

    #[test]
    fn participants_are_deduped_per_app() {
        let table = EventTable::new(vec![
            make_event("app.a", "3"),
            make_event("app.a", "1"),
            make_event("app.a", "3"),
            make_event("app.b", "2"),
        ]);
        assert_eq!(table.participants("app.a"), ["1", "3"]);
        assert_eq!(table.participants("app.b"), ["2"]);
        assert!(table.participants("app.c").is_empty());
        assert_eq!(table.app_count(), 2);
    }
}

//! Pivot of extracted journeys into step-indexed rows (Step0, Step1, ...).

use serde::Serialize;

use crate::extract::JourneyRow;

/// One pivoted journey: identifier columns plus step cells.
///
/// Journeys shorter than the widest one in the table are padded with `None`
/// rather than failing the pivot.
#[derive(Debug, Clone, Serialize)]
pub struct StepRow {
    pub participant_id: String,
    pub session_id: String,
    values: Vec<Option<String>>,
}

impl StepRow {
    /// Ordered step labels, trailing padding skipped.
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map_while(|v| v.as_deref())
    }
}

/// Step-indexed journey table: one row per retained (participant, session).
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepTable {
    columns: Vec<String>,
    rows: Vec<StepRow>,
}

impl StepTable {
    /// Pivot journeys into step columns sized to the longest journey.
    pub fn from_journeys(journeys: Vec<JourneyRow>) -> Self {
        let width = journeys.iter().map(|j| j.steps.len()).max().unwrap_or(0);
        let columns = (0..width).map(|i| format!("Step{}", i)).collect();
        let rows = journeys
            .into_iter()
            .map(|journey| {
                let mut values: Vec<Option<String>> =
                    journey.steps.into_iter().map(Some).collect();
                values.resize(width, None);
                StepRow {
                    participant_id: journey.participant_id,
                    session_id: journey.session_id,
                    values,
                }
            })
            .collect();
        Self { columns, rows }
    }

    /// Step column names in order (`Step0`, `Step1`, ...).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Zero-based index of a step column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell value at a row index and column name; `None` for padding,
    /// unknown columns, or out-of-bounds rows.
    pub fn get_value(&self, row: usize, col: &str) -> Option<&str> {
        let col_idx = self.column_index(col)?;
        self.rows.get(row)?.values.get(col_idx)?.as_deref()
    }

    pub fn rows(&self) -> &[StepRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey(participant: &str, session: &str, steps: &[&str]) -> JourneyRow {
        JourneyRow {
            participant_id: participant.to_owned(),
            session_id: session.to_owned(),
            steps: steps.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn short_rows_are_padded_not_rejected() {
        let table = StepTable::from_journeys(vec![
            journey("p1", "s1", &["Home", "Search", "Purchase"]),
            journey("p2", "s2", &["Home", "Non-Purchase"]),
        ]);

        assert_eq!(table.columns(), ["Step0", "Step1", "Step2"]);
        assert_eq!(table.get_value(0, "Step2"), Some("Purchase"));
        assert_eq!(table.get_value(1, "Step1"), Some("Non-Purchase"));
        assert_eq!(table.get_value(1, "Step2"), None);
    }

    #[test]
    fn steps_iterator_stops_at_padding() {
        let table = StepTable::from_journeys(vec![
            journey("p1", "s1", &["Home", "Search", "Category", "Purchase"]),
            journey("p2", "s2", &["Home", "Non-Purchase"]),
        ]);
        let short: Vec<&str> = table.rows()[1].steps().collect();
        assert_eq!(short, ["Home", "Non-Purchase"]);
    }

    #[test]
    fn empty_pivot_is_empty_table() {
        let table = StepTable::from_journeys(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());
        assert_eq!(table.get_value(0, "Step0"), None);
    }

    #[test]
    fn column_lookup_by_name() {
        let table = StepTable::from_journeys(vec![journey("p1", "s1", &["A", "B"])]);
        assert_eq!(table.column_index("Step1"), Some(1));
        assert_eq!(table.column_index("Step9"), None);
    }
}

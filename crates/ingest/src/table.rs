//! Raw CSV records → validated event table.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

use flowpath_core::{Event, EventTable, FlowpathError, IssueKind, RowIssue};

use crate::csv::CsvDocument;

/// Columns the source table must provide, located by header name.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "participantId",
    "session",
    "apppackagename",
    "pagetype",
    "eventtime",
];

/// Convert a parsed CSV document into the event table.
///
/// A missing required column is fatal before any computation. Rows with
/// unparseable timestamps are excluded and reported — a row that cannot be
/// placed in time must not silently mis-sort a journey.
pub fn build_table(doc: &CsvDocument) -> Result<(EventTable, Vec<RowIssue>), FlowpathError> {
    let col = |name: &str| -> Result<usize, FlowpathError> {
        doc.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| FlowpathError::MissingColumn(name.to_owned()))
    };
    let participant_col = col(REQUIRED_COLUMNS[0])?;
    let session_col = col(REQUIRED_COLUMNS[1])?;
    let app_col = col(REQUIRED_COLUMNS[2])?;
    let page_col = col(REQUIRED_COLUMNS[3])?;
    let time_col = col(REQUIRED_COLUMNS[4])?;

    let width = 1 + [participant_col, session_col, app_col, page_col, time_col]
        .into_iter()
        .max()
        .unwrap_or(0);

    let mut events = Vec::with_capacity(doc.records.len());
    let mut issues = Vec::new();

    for (line, cells) in &doc.records {
        if cells.len() < width {
            warn!(
                line,
                cells = cells.len(),
                expected = width,
                "short row excluded"
            );
            issues.push(RowIssue {
                line: *line,
                kind: IssueKind::ShortRow,
                value: cells.join(","),
            });
            continue;
        }

        let raw_time = &cells[time_col];
        let Some(timestamp) = parse_event_time(raw_time) else {
            warn!(line, value = %raw_time, "unparseable event time, row excluded");
            issues.push(RowIssue {
                line: *line,
                kind: IssueKind::BadTimestamp,
                value: raw_time.clone(),
            });
            continue;
        };

        events.push(Event {
            participant_id: cells[participant_col].clone(),
            session_id: cells[session_col].clone(),
            app_id: cells[app_col].clone(),
            page_type: cells[page_col].clone(),
            timestamp,
        });
    }

    Ok((EventTable::new(events), issues))
}

/// Parse an event time permissively: RFC 3339, common datetime layouts with
/// optional fractional seconds, bare dates, and epoch seconds/milliseconds.
pub fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    if let Ok(n) = s.parse::<i64>() {
        // 13-digit values are epoch milliseconds, shorter ones seconds.
        return if n.abs() >= 1_000_000_000_000 {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;

    const HEADER: &str = "participantId,session,apppackagename,pagetype,eventtime";

    fn table_of(body: &str) -> Result<(EventTable, Vec<RowIssue>), FlowpathError> {
        build_table(&parse_csv(body).unwrap())
    }

    #[test]
    fn missing_column_is_fatal() {
        let body = "participantId,session,apppackagename,pagetype\np1,s1,app,Home\n";
        let err = table_of(body).unwrap_err();
        match err {
            FlowpathError::MissingColumn(name) => assert_eq!(name, "eventtime"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn columns_resolve_by_name_not_position() {
        let body = "eventtime,pagetype,apppackagename,session,participantId\n\
                    2024-03-01 10:00:00,Home,app,s1,p1\n";
        let (table, issues) = table_of(body).unwrap();
        assert!(issues.is_empty());
        assert_eq!(table.len(), 1);
        let event = &table.events()[0];
        assert_eq!(event.participant_id, "p1");
        assert_eq!(event.page_type, "Home");
    }

    #[test]
    fn bad_timestamp_excludes_row_and_reports_it() {
        let body = format!(
            "{HEADER}\np1,s1,app,Home,2024-03-01 10:00:00\np1,s1,app,Search,not-a-time\n"
        );
        let (table, issues) = table_of(&body).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::BadTimestamp);
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].value, "not-a-time");
    }

    #[test]
    fn short_row_excludes_and_reports() {
        let body = format!("{HEADER}\np1,s1,app\n");
        let (table, issues) = table_of(&body).unwrap();
        assert!(table.is_empty());
        assert_eq!(issues[0].kind, IssueKind::ShortRow);
    }

    #[test]
    fn accepted_timestamp_forms() {
        for raw in [
            "2024-03-01T10:15:00Z",
            "2024-03-01T10:15:00+07:00",
            "2024-03-01 10:15:00",
            "2024-03-01 10:15:00.250",
            "2024/03/01 10:15:00",
            "2024-03-01",
            "1709287200",
            "1709287200123",
        ] {
            assert!(parse_event_time(raw).is_some(), "rejected {raw}");
        }
    }

    #[test]
    fn rejected_timestamp_forms() {
        for raw in ["", "   ", "yesterday", "10:15:00", "01-03-2024 10:15"] {
            assert!(parse_event_time(raw).is_none(), "accepted {raw}");
        }
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let utc = parse_event_time("2024-03-01T10:00:00+07:00").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap());
    }
}

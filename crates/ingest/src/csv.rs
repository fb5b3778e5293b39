//! Minimal RFC 4180 reader: quoted fields, doubled-quote escapes, CRLF,
//! and newlines inside quoted fields. The example corpus carries no CSV
//! crate, so this scanner stays hand-written.

use flowpath_core::FlowpathError;

/// A parsed CSV document: header row plus data records.
#[derive(Debug)]
pub struct CsvDocument {
    pub header: Vec<String>,
    /// Data records with the 1-based source line each record starts on.
    pub records: Vec<(usize, Vec<String>)>,
}

/// Parse a whole CSV body. The first record is the header.
pub fn parse_csv(input: &str) -> Result<CsvDocument, FlowpathError> {
    let mut records: Vec<(usize, Vec<String>)> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    line += 1;
                    record.push(std::mem::take(&mut field));
                    push_record(&mut records, &mut record, record_line);
                    record_line = line;
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(FlowpathError::Csv {
            line: record_line,
            message: "unterminated quoted field".to_owned(),
        });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, &mut record, record_line);
    }

    if records.is_empty() {
        return Err(FlowpathError::EmptySource);
    }
    let (_, header) = records.remove(0);
    Ok(CsvDocument { header, records })
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, record: &mut Vec<String>, line: usize) {
    let cells = std::mem::take(record);
    // A bare newline is not a record.
    if cells.len() == 1 && cells[0].is_empty() {
        return;
    }
    records.push((line, cells));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rows() {
        let doc = parse_csv("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(doc.header, ["a", "b", "c"]);
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.records[0], (2, vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]));
        assert_eq!(doc.records[1].0, 3);
    }

    #[test]
    fn quoted_field_keeps_comma_and_escaped_quote() {
        let doc = parse_csv("a,b\n\"x,y\",\"he said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(doc.records[0].1, ["x,y", "he said \"hi\""]);
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        let doc = parse_csv("a,b\r\n1,2\r\n3,4").unwrap();
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.records[1].1, ["3", "4"]);
    }

    #[test]
    fn newline_inside_quotes_stays_in_field() {
        let doc = parse_csv("a,b\n\"line1\nline2\",x\n").unwrap();
        assert_eq!(doc.records[0].1[0], "line1\nline2");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let doc = parse_csv("a,b\n\n1,2\n\n").unwrap();
        assert_eq!(doc.records.len(), 1);
        // Line numbering still counts the blank line.
        assert_eq!(doc.records[0].0, 3);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_csv("a,b\n\"oops,2\n").unwrap_err();
        assert!(matches!(err, FlowpathError::Csv { .. }));
    }

    #[test]
    fn empty_input_is_empty_source() {
        assert!(matches!(parse_csv(""), Err(FlowpathError::EmptySource)));
    }
}

// src/core/csv.rs
//
// Reader for "Publish to web → CSV" spreadsheet exports.
//
// Deliberately narrow dialect:
// - one record per `\n`-separated line (a trailing `\r` is trimmed away)
// - `,` is the only separator
// - `"` toggles a quoted span; quote characters themselves are dropped
// - no `""` escapes, no newlines inside fields
// Malformed input (odd quote counts, ragged rows) never errors.

use std::mem::take;

use super::record::Record;

/* ---------------- Parsing ---------------- */

/// Parse export text into records keyed by the first line's field names.
/// Blank lines are skipped.
pub fn parse_records(text: &str) -> Vec<Record> {
    let mut lines = text.split('\n');
    let headers = match lines.next() {
        Some(first) => split_header(first),
        None => return Vec::new(),
    };

    lines
        .filter(|line| !trim(line).is_empty())
        .map(|line| build_record(&headers, split_row(line)))
        .collect()
}

/// Header names: plain comma split, no quote tracking.
pub fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(clean_field).collect()
}

/// Split one data line on commas that sit outside a quoted span.
pub fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut field = s!();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(clean_field(&take(&mut field))),
            _ => field.push(ch),
        }
    }
    // Last value, even if the quote was never closed.
    values.push(clean_field(&field));

    values
}

/// Nth value → Nth header; short rows pad with "", extra values are dropped.
fn build_record(headers: &[String], values: Vec<String>) -> Record {
    let mut record = Record::with_capacity(headers.len());
    let mut values = values.into_iter();
    for header in headers {
        record.insert(header, values.next().unwrap_or_default());
    }
    record
}

/* ---------------- Field cleanup ---------------- */

fn clean_field(raw: &str) -> String {
    s!(strip_wrapping_quote(trim(raw)))
}

/// Whitespace trim that also drops a byte-order mark (exports often start with one).
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Drop one leading and one trailing `"`, each independently.
fn strip_wrapping_quote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

//! Rendering report rows for the terminal and for export.
//!
//! Columns come from the first row; every later row is read in that column
//! order. Nulls render as empty cells.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::io;

use super::ClientError;
use crate::model::Record;

/// Printed in place of a table when a report returns nothing.
pub const NO_ROWS: &str = "No rows returned.";

/// `board_member_id` -> `Board Member Id`.
pub fn to_title(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cell text for a value.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn columns(rows: &[Record]) -> Vec<&str> {
    rows.first()
        .map(|row| row.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Plain-text table with title-cased headers.
pub fn render_table(rows: &[Record]) -> String {
    if rows.is_empty() {
        return NO_ROWS.to_string();
    }

    let cols = columns(rows);
    let header: Vec<String> = cols.iter().map(|c| to_title(c)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| cols.iter().map(|c| format_cell(row.get(*c))).collect())
        .collect();

    let widths: Vec<usize> = (0..cols.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// CSV with the raw column names as header. Empty when there are no rows.
pub fn render_csv(rows: &[Record]) -> Result<String, ClientError> {
    let cols = columns(rows);
    if cols.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&cols)?;
    for row in rows {
        writer.write_record(cols.iter().map(|c| format_cell(row.get(*c))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(text)
}

/// `Filters: property_id=4  |  board_member_id=2`, or `None` when empty.
pub fn filters_summary(filters: &[(String, String)]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let parts: Vec<String> = filters.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    Some(format!("Filters: {}", parts.join("  |  ")))
}

/// Export file name: slugged title (at most 60 chars) plus a minute stamp.
pub fn export_filename(title: &str, extension: &str, at: NaiveDateTime) -> String {
    let mut slug = String::new();
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug: String = slug.trim_matches('-').chars().take(60).collect();
    let slug = if slug.is_empty() { "report" } else { slug.as_str() };
    format!("{}_{}.{}", slug, at.format("%Y-%m-%d_%H%M"), extension)
}

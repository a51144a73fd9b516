//! Output serializers for recovered tables
//!
//! Three formats: tabular CSV (one table per writer), a plain text report
//! and a Markdown card document. All of them treat absent fields as empty,
//! never as an error.

use crate::types::{Document, Record, Table};

use std::io;

/// Columns for a table: the first-seen union of field names across records
fn columns(table: &Table) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in table.records() {
        for (name, _) in record.fields() {
            if !columns.iter().any(|column| column == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn cell_text(record: &Record, column: &str) -> String {
    record
        .get(column)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// Write one table as comma-delimited CSV with a header row
pub fn write_tabular<W: io::Write>(table: &Table, out: W) -> io::Result<()> {
    let columns = columns(table);
    if columns.is_empty() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&columns)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    for record in table.records() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| cell_text(record, column))
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    }
    writer.flush()
}

/// Write the whole document as a human readable plain text report
pub fn write_report<W: io::Write>(document: &Document, mut out: W) -> io::Result<()> {
    for table in document.tables() {
        writeln!(out, "== {} ==", table.name())?;
        writeln!(out)?;
        for (index, record) in table.records().iter().enumerate() {
            writeln!(out, "--- Entry {} ---", index + 1)?;
            for (name, value) in record.fields() {
                writeln!(out, "{}: {}", name, value)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write the whole document as a Markdown file with one table per section
pub fn write_cards<W: io::Write>(document: &Document, mut out: W) -> io::Result<()> {
    for table in document.tables() {
        let columns = columns(table);
        if columns.is_empty() {
            continue;
        }
        writeln!(out, "## {}", table.name())?;
        writeln!(out)?;
        writeln!(out, "| {} |", columns.join(" | "))?;
        let rule: Vec<&str> = columns.iter().map(|_| "---").collect();
        writeln!(out, "| {} |", rule.join(" | "))?;
        for record in table.records() {
            let row: Vec<String> = columns
                .iter()
                .map(|column| escape_md(&cell_text(record, column)))
                .collect();
            writeln!(out, "| {} |", row.join(" | "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Keep cell content from breaking the Markdown table structure
fn escape_md(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

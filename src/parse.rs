//! Schema-driven parser for the decrypted table data
//!
//! Individual malformed blocks never abort a parse. Each block either
//! contributes a list of records or a [`BlockWarning`], and only a fully
//! empty result is an error.

use crate::errors::NoDataError;
use crate::fields;
use crate::schema::{
    self, FieldDecode, FIELD_DELIMITER, ROW_COUNT_HEADER, TABLE_SEPARATOR, UNKNOWN_TABLE_PREFIX,
};
use crate::types::{BlockWarning, Document, Record};

use csv::ReaderBuilder;

/// Parse decrypted export plaintext into tables of records.
///
/// Blocks that fail to parse are skipped and recorded as warnings on the
/// returned [`Document`]. Fails only when no block yields any records.
pub fn parse(plaintext: &str) -> Result<Document, NoDataError> {
    let mut document = Document::default();
    let mut unknown_seen = 0;

    for (block_index, block) in plaintext.split(TABLE_SEPARATOR).enumerate() {
        let block = block.trim();
        // too small to be a table
        if block.matches(';').count() < 2 {
            continue;
        }
        match parse_block(block, &mut unknown_seen) {
            Ok(Some((name, records))) => document.push_records(name, records),
            Ok(None) => {}
            Err(err) => document.push_warning(BlockWarning {
                block_index,
                message: err.to_string(),
            }),
        }
    }

    if document.is_empty() {
        return Err(NoDataError::NoUsableRecords);
    }
    Ok(document)
}

/// Parse one block. `Ok(None)` means the block was valid but carried
/// nothing worth keeping - a marker table, an empty header, or rows that
/// all decoded to nothing.
fn parse_block(
    block: &str,
    unknown_seen: &mut usize,
) -> Result<Option<(String, Vec<Record>)>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .from_reader(block.as_bytes());
    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    if header.iter().all(|name| name.is_empty()) {
        return Ok(None);
    }
    if header.len() == 1 && header[0] == ROW_COUNT_HEADER {
        return Ok(None);
    }

    let (name, retained, required) = match schema::classify(&header) {
        Some(schema) => {
            let retained: Vec<(String, FieldDecode)> = schema
                .fields
                .iter()
                .map(|(field, rule)| (field.to_string(), *rule))
                .collect();
            (schema.name.to_string(), retained, schema.required)
        }
        None => {
            *unknown_seen += 1;
            let retained = header
                .iter()
                .filter(|name| !name.is_empty())
                .map(|name| (name.clone(), FieldDecode::Plain))
                .collect();
            (
                format!("{}{}", UNKNOWN_TABLE_PREFIX, unknown_seen),
                retained,
                None,
            )
        }
    };

    // column position of each retained field, if present in this block
    let positions: Vec<Option<usize>> = retained
        .iter()
        .map(|(field, _)| header.iter().position(|name| name == field))
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for ((field, rule), position) in retained.iter().zip(&positions) {
            let cell = match position.and_then(|index| row.get(index)) {
                Some(cell) => cell,
                None => continue,
            };
            if let Some(value) = fields::decode_field(*rule, cell) {
                record.insert(field.clone(), value);
            }
        }
        if let Some(required) = required {
            if record.get(required).is_none() {
                continue;
            }
        }
        if record.is_empty() {
            continue;
        }
        records.push(record);
    }

    if records.is_empty() {
        Ok(None)
    } else {
        Ok(Some((name, records)))
    }
}

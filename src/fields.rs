//! Per-field decoding rules
//!
//! Every cell in the decrypted tables carries one extra base64 layer on top
//! of the table encoding. Some fields then need a second transform: app
//! link rewriting, JSON detail blobs, or `&&&`-separated lists whose entries
//! are themselves base64.

use crate::schema::{FieldDecode, LIST_SEPARATOR, NULL_SENTINEL};
use crate::types::Value;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Decode one raw cell and apply the field's rule.
///
/// Returns `None` for cells that decode to nothing - empty cells, the null
/// sentinel, or transforms that yield no entries. Such fields are omitted
/// from the record.
pub(crate) fn decode_field(rule: FieldDecode, cell: &str) -> Option<Value> {
    let decoded = decode_cell(cell);
    if decoded.is_empty() {
        return None;
    }
    match rule {
        FieldDecode::Plain => Some(Value::Text(decoded)),
        FieldDecode::OriginUrl => Some(Value::Text(normalize_origin_url(&decoded))),
        FieldDecode::Structured => Some(parse_structured(&decoded)),
        FieldDecode::MultiValued => {
            let entries = split_multi(&decoded);
            if entries.is_empty() {
                None
            } else {
                Some(Value::List(entries))
            }
        }
    }
}

/// Remove the base64 layer from a cell.
///
/// Empty cells and the null sentinel decode to empty. Cells that are not
/// valid base64 (or not UTF-8 underneath) are passed through unchanged, as
/// some exports leave individual fields unencoded.
fn decode_cell(cell: &str) -> String {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == NULL_SENTINEL {
        return String::new();
    }
    match BASE64.decode(trimmed) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| trimmed.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

/// Rewrite `android://<cert>@<package>` app links to the bare package
/// identifier. Everything else passes through unchanged, including values
/// that already look like domains or http URLs.
fn normalize_origin_url(url: &str) -> String {
    if url.starts_with("android://") {
        if let Some(at) = url.rfind('@') {
            return url[at + 1..].to_string();
        }
    }
    url.to_string()
}

/// Parse a JSON detail blob. The export escapes embedded quotes and may
/// wrap the whole value in one layer of quotes; both are undone before
/// parsing. Unparseable values fall back to the decoded text.
fn parse_structured(decoded: &str) -> Value {
    let unescaped = decoded.replace("\\\"", "\"");
    let trimmed = unescaped.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    match serde_json::from_str(inner) {
        Ok(value) => Value::Structured(value),
        Err(_) => Value::Text(decoded.to_string()),
    }
}

/// Split a multi-valued cell on `&&&`. Each entry is `<base64>#<marker>`;
/// the marker after `#` is discarded and empty entries are skipped.
fn split_multi(decoded: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for part in decoded.split(LIST_SEPARATOR) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let encoded = part.split_once('#').map_or(part, |(lead, _)| lead);
        if encoded.is_empty() {
            continue;
        }
        if let Ok(bytes) = BASE64.decode(encoded) {
            if let Ok(text) = String::from_utf8(bytes) {
                if !text.is_empty() {
                    entries.push(text);
                }
            }
        }
    }
    entries
}

//! Parsed table datatypes

use std::fmt;

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain decoded text
    Text(String),
    /// Ordered list from a multi-valued field
    List(Vec<String>),
    /// Parsed JSON detail blob
    Structured(serde_json::Value),
}

impl Value {
    /// The text content, if this is a plain text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::List(entries) => f.write_str(&entries.join(", ")),
            Value::Structured(json) => write!(f, "{}", json),
        }
    }
}

/// One row of a table, as decoded field name/value pairs.
///
/// Fields keep the declaration order of the table's schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Record {
        Record::default()
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Add a decoded field
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// Iterate fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// True if the record holds no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// A recognized (or fallback) table and its records, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    records: Vec<Record>,
}

impl Table {
    pub(crate) fn new(name: String) -> Table {
        Table {
            name,
            records: Vec::new(),
        }
    }

    /// Schema name, or the synthesized `unknown_data_N` name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records in source order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn extend(&mut self, records: Vec<Record>) {
        self.records.extend(records);
    }
}

/// A warning for a block that could not be parsed and was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct BlockWarning {
    /// Index of the block in the decrypted data, in separator order
    pub block_index: usize,
    /// What went wrong inside the block
    pub message: String,
}

impl fmt::Display for BlockWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}: {}", self.block_index, self.message)
    }
}

/// Everything recovered from one decrypted export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    tables: Vec<Table>,
    warnings: Vec<BlockWarning>,
}

impl Document {
    pub(crate) fn push_records(&mut self, name: String, records: Vec<Record>) {
        match self.tables.iter_mut().find(|table| table.name == name) {
            Some(table) => table.extend(records),
            None => {
                let mut table = Table::new(name);
                table.extend(records);
                self.tables.push(table);
            }
        }
    }

    pub(crate) fn push_warning(&mut self, warning: BlockWarning) {
        self.warnings.push(warning);
    }

    /// All recovered tables, in source order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Warnings for blocks that were skipped as malformed
    pub fn warnings(&self) -> &[BlockWarning] {
        &self.warnings
    }

    /// True if no table holds any records
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

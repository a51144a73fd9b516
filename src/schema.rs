//! Fixed catalog of known table layouts
//!
//! The decrypted export is a sequence of semicolon-delimited tables. Each
//! known table kind is identified by a fingerprint - a set of header names
//! that must all be present. The catalog is matched in declared order and
//! the first matching schema wins.

/// Literal token separating tables in the decrypted plaintext
pub(crate) const TABLE_SEPARATOR: &str = "next_table";
/// Field delimiter within a table
pub(crate) const FIELD_DELIMITER: u8 = b';';
/// Base64 of `&&&NULL&&&`, the format's encoded null value
pub(crate) const NULL_SENTINEL: &str = "JiYmTlVMTCYmJg==";
/// Separator between entries of a multi-valued cell
pub(crate) const LIST_SEPARATOR: &str = "&&&";
/// A block whose header is this single field is an internal row-count
/// marker and carries no record data
pub(crate) const ROW_COUNT_HEADER: &str = "rowcount";
/// Name prefix for tables matching no known schema
pub(crate) const UNKNOWN_TABLE_PREFIX: &str = "unknown_data_";

/// Decoding rule applied to a field after the base64 layer is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecode {
    /// Use the decoded text as-is
    Plain,
    /// Unescape quotes and parse as a JSON value, falling back to text
    Structured,
    /// Split on `&&&` into an ordered list of base64-decoded entries
    MultiValued,
    /// Rewrite `android://` app links to their package identifier
    OriginUrl,
}

/// Layout of one known table kind
pub struct TableSchema {
    /// Table name used as the key in the parsed result
    pub name: &'static str,
    /// Header names that must all be present for this schema to match
    pub fingerprint: &'static [&'static str],
    /// Ordered allow-list of fields to retain, with their decoding rule
    pub fields: &'static [(&'static str, FieldDecode)],
    /// Rows missing this field are dropped entirely
    pub required: Option<&'static str>,
}

impl TableSchema {
    /// True if every fingerprint field appears in `header`
    pub(crate) fn matches(&self, header: &[String]) -> bool {
        self.fingerprint
            .iter()
            .all(|field| header.iter().any(|h| h == field))
    }
}

pub(crate) const SCHEMAS: [TableSchema; 4] = [
    TableSchema {
        name: "logins",
        fingerprint: &["origin_url", "username_value", "password_value"],
        fields: &[
            ("title", FieldDecode::Plain),
            ("origin_url", FieldDecode::OriginUrl),
            ("action_url", FieldDecode::Plain),
            ("username_value", FieldDecode::Plain),
            ("password_value", FieldDecode::Plain),
            ("credential_memo", FieldDecode::Plain),
        ],
        required: Some("title"),
    },
    TableSchema {
        name: "identities",
        fingerprint: &["full_name", "email_address"],
        fields: &[
            ("full_name", FieldDecode::Plain),
            ("email_address", FieldDecode::Plain),
            ("birth_date", FieldDecode::Plain),
            ("phone_numbers", FieldDecode::MultiValued),
            ("identity_detail", FieldDecode::Structured),
        ],
        required: None,
    },
    TableSchema {
        name: "addresses",
        fingerprint: &["street_address", "city", "zipcode"],
        fields: &[
            ("recipient_name", FieldDecode::Plain),
            ("street_address", FieldDecode::Plain),
            ("city", FieldDecode::Plain),
            ("state", FieldDecode::Plain),
            ("zipcode", FieldDecode::Plain),
            ("country_code", FieldDecode::Plain),
            ("address_detail", FieldDecode::Structured),
        ],
        required: None,
    },
    TableSchema {
        name: "notes",
        fingerprint: &["note_title", "note_content"],
        fields: &[
            ("note_title", FieldDecode::Plain),
            ("note_content", FieldDecode::Plain),
        ],
        required: None,
    },
];

/// The catalog of known table layouts, in match order
pub fn known_schemas() -> &'static [TableSchema] {
    &SCHEMAS
}

/// Find the first schema whose fingerprint is satisfied by `header`
pub(crate) fn classify(header: &[String]) -> Option<&'static TableSchema> {
    SCHEMAS.iter().find(|schema| schema.matches(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn classify_matches_logins() {
        let h = header(&[
            "_id",
            "origin_url",
            "action_url",
            "username_value",
            "password_value",
            "title",
        ]);
        assert_eq!(classify(&h).map(|s| s.name), Some("logins"));
    }

    #[test]
    fn classify_requires_full_fingerprint() {
        // origin_url alone is not enough to be a logins table
        let h = header(&["origin_url", "title"]);
        assert!(classify(&h).is_none());
    }

    #[test]
    fn classify_matches_each_known_kind() {
        let cases = [
            (vec!["full_name", "email_address", "birth_date"], "identities"),
            (vec!["street_address", "city", "zipcode"], "addresses"),
            (vec!["note_title", "note_content"], "notes"),
        ];
        for (fields, expected) in cases {
            let h = header(&fields);
            assert_eq!(classify(&h).map(|s| s.name), Some(expected));
        }
    }
}

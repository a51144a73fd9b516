#![deny(missing_docs)]

//! Module to decrypt and parse Samsung Pass (.spass) export files.
//!
//! An export file is a base64 wrapped, AES-256-CBC encrypted blob whose
//! plaintext holds several semicolon-delimited tables with base64 encoded
//! cells. This crate recovers those tables as structured records:
//!
//! * [`Envelope`] represents the encrypted file's binary layout
//! * [`Document`] is the recovered mapping from table name to records
//!
//! # Recovering an export
//!
//! ```no_run
//! # fn main() -> Result<(), spass_rs::Error> {
//! let raw = std::fs::read("backup.spass").unwrap();
//! let document = spass_rs::recover(&raw, "hunter2")?;
//!
//! for table in document.tables() {
//!     println!("{}: {} records", table.name(), table.records().len());
//! }
//! if let Some(logins) = document.table("logins") {
//!     for login in logins.records() {
//!         println!("{:?}", login.get("title"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The two pipeline stages are also available separately: [`decrypt`]
//! produces the raw plaintext table data, and [`parse`] turns plaintext
//! into a [`Document`]. Malformed individual tables never fail a parse;
//! they are skipped and reported via [`Document::warnings`].

mod crypto;
mod envelope;
pub mod errors;
mod fields;
pub mod output;
mod parse;
mod schema;
mod types;

pub use crypto::KDF_ITERATIONS;
pub use envelope::Envelope;
pub use errors::Error;
pub use parse::parse;
pub use schema::{known_schemas, FieldDecode, TableSchema};
pub use types::{BlockWarning, Document, Record, Table, Value};

/// Decode and decrypt a raw export file, returning the plaintext table data.
///
/// Fails with [`errors::FormatError`] for structurally invalid files and
/// [`errors::CryptoError`] when the padding check after decryption fails,
/// which almost always means a wrong password.
pub fn decrypt(raw: &[u8], password: &str) -> Result<String, Error> {
    let envelope = Envelope::decode(raw)?;
    envelope.decrypt(password)
}

/// Run the full pipeline: decode, decrypt and parse an export file.
pub fn recover(raw: &[u8], password: &str) -> Result<Document, Error> {
    let plaintext = decrypt(raw, password)?;
    Ok(parse(&plaintext)?)
}

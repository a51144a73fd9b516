//! Error types for spass-rs
//!
//! Decryption failures deliberately carry no underlying cause. A padding
//! failure, a short envelope and a garbled plaintext are all consistent with
//! either a wrong password or a corrupt file, and the two cannot be told
//! apart, so the error text stays generic rather than describing which
//! internal step broke.

use thiserror::Error;

#[derive(Error, Debug)]
/// Wrapper error type for this library
pub enum Error {
    /// The export file's layout or encodings are invalid
    #[error("Could not read export: {0}")]
    Format(#[from] FormatError),
    /// Decryption failed - wrong password or corrupt file
    #[error("Could not decrypt export: {0}")]
    Crypto(#[from] CryptoError),
    /// Decryption succeeded but no table produced any records
    #[error("{0}")]
    NoData(#[from] NoDataError),
}

#[derive(Error, Debug)]
/// Errors encountered reading the envelope layout
pub enum FormatError {
    /// The file is not valid base64 text
    #[error("Invalid envelope encoding")]
    InvalidEnvelopeEncoding,
    /// The decoded envelope is too short to hold salt, IV and ciphertext
    #[error("Envelope too short - {0} bytes")]
    EnvelopeTooShort(usize),
    /// The ciphertext length is not a multiple of the cipher block size
    #[error("Ciphertext is not block aligned - {0} bytes")]
    MisalignedCiphertext(usize),
    /// The decrypted data is not valid UTF-8 text
    #[error("Decrypted data is not text")]
    NonTextPlaintext,
}

#[derive(Error, Debug)]
/// Errors encountered decrypting the envelope contents
pub enum CryptoError {
    /// The padding check failed. This indicates a wrong password or corrupt file
    #[error("Padding check failed - wrong password or corrupt file")]
    BadPadding,
}

#[derive(Error, Debug)]
/// Errors encountered when decryption yields nothing usable
pub enum NoDataError {
    /// No table in the decrypted data produced any records
    #[error("No usable records found in decrypted data")]
    NoUsableRecords,
}

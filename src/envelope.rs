//! Outer envelope layout of a .spass export
//!
//! An export file is a single base64 string wrapping a fixed binary layout:
//! a 20 byte PBKDF2 salt, a 16 byte IV, then AES-256-CBC ciphertext.

use crate::crypto::{self, DerivedKey, BLOCK_LEN, IV_LEN, SALT_LEN};
use crate::errors::{Error, FormatError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// An encrypted export, sliced into its layout components but not yet
/// decrypted.
pub struct Envelope {
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Strip the outer base64 text and slice the fixed binary layout.
    pub fn decode(raw: &[u8]) -> Result<Envelope, FormatError> {
        let text =
            std::str::from_utf8(raw).map_err(|_| FormatError::InvalidEnvelopeEncoding)?;
        let binary = BASE64
            .decode(text.trim())
            .map_err(|_| FormatError::InvalidEnvelopeEncoding)?;

        if binary.len() < SALT_LEN + IV_LEN {
            return Err(FormatError::EnvelopeTooShort(binary.len()));
        }
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&binary[..SALT_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&binary[SALT_LEN..SALT_LEN + IV_LEN]);
        let ciphertext = binary[SALT_LEN + IV_LEN..].to_vec();

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(FormatError::MisalignedCiphertext(ciphertext.len()));
        }
        Ok(Envelope {
            salt,
            iv,
            ciphertext,
        })
    }

    /// Derive the key for `password` and decrypt to the plaintext table data.
    ///
    /// The key derivation runs the format's full 70 000 PBKDF2 iterations on
    /// every call, so this is deliberately slow for each password attempt.
    pub fn decrypt(&self, password: &str) -> Result<String, Error> {
        let key = DerivedKey::derive(password, &self.salt);
        let data = crypto::decrypt_and_unpad(&key, self.iv, &self.ciphertext)?;
        String::from_utf8(data).map_err(|_| FormatError::NonTextPlaintext.into())
    }

    /// Salt used for key derivation
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Cipher initialization vector
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

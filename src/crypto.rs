use crate::errors::CryptoError;

use aes::Aes256;
use cipher::block_padding::{Padding, Pkcs7};
use cipher::generic_array::GenericArray;
use cipher::{Block, BlockDecryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Length of the envelope salt in bytes
pub const SALT_LEN: usize = 20;
/// Length of the cipher initialization vector in bytes
pub const IV_LEN: usize = 16;
/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;
/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;
/// PBKDF2 iteration count, fixed by the export format
pub const KDF_ITERATIONS: u32 = 70_000;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Key derived from the user's password and the envelope salt.
///
/// Never persisted - lives for a single decrypt call.
pub(crate) struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// PBKDF2-HMAC-SHA256 with the format's fixed iteration count.
    ///
    /// Every password attempt repeats the full derivation; nothing is cached
    /// between calls.
    pub(crate) fn derive(password: &str, salt: &[u8]) -> DerivedKey {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, KDF_ITERATIONS, &mut key);
        DerivedKey(key)
    }
}

/// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding.
///
/// The caller has already checked that `ciphertext` is non-empty and block
/// aligned. A padding failure is the primary wrong-password signal.
pub(crate) fn decrypt_and_unpad(
    key: &DerivedKey,
    iv: [u8; IV_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let mut cipher = Aes256CbcDec::new(&key.0.into(), &iv.into());
    let mut buffer = ciphertext.to_vec();
    for chunk in buffer.chunks_exact_mut(BLOCK_LEN) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
    }

    let pad_start = buffer.len() - BLOCK_LEN;
    let kept = {
        let last = Block::<Aes256>::from_slice(&buffer[pad_start..]);
        let unpadded = Pkcs7::unpad(last).map_err(|_| CryptoError::BadPadding)?;
        unpadded.len()
    };
    buffer.truncate(pad_start + kept);
    Ok(buffer)
}

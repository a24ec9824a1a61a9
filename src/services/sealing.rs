//! Confidentiality sealing for donation payloads.
//!
//! AES-256-CBC with a fresh random IV per seal, output as
//! `hex(iv):hex(ciphertext)`. This is confidentiality at rest only; there is
//! no authentication tag, so an unseal failure means corruption, not a
//! reliable tamper signal.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::Rng;

use crate::errors::{ImpactClickError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

#[derive(Clone)]
pub struct Sealer {
    key: [u8; KEY_LEN],
}

impl Sealer {
    /// Fails fast when the configured key is not exactly 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = key.try_into().map_err(|_| {
            ImpactClickError::validation(format!(
                "encryption key must be exactly {} bytes, got {}",
                KEY_LEN,
                key.len()
            ))
        })?;
        Ok(Sealer { key })
    }

    pub fn seal(&self, plaintext: &[u8]) -> Result<String> {
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        Ok(format!("{}:{}", hex::encode(iv), hex::encode(ciphertext)))
    }

    pub fn unseal(&self, sealed: &str) -> Result<Vec<u8>> {
        let (iv_hex, ct_hex) = sealed
            .split_once(':')
            .ok_or_else(|| ImpactClickError::sealing("malformed sealed blob"))?;

        let iv = hex::decode(iv_hex)
            .map_err(|e| ImpactClickError::sealing(format!("invalid IV encoding: {}", e)))?;
        let iv: [u8; IV_LEN] = iv
            .as_slice()
            .try_into()
            .map_err(|_| ImpactClickError::sealing("unexpected IV length"))?;

        let ciphertext = hex::decode(ct_hex)
            .map_err(|e| ImpactClickError::sealing(format!("invalid ciphertext encoding: {}", e)))?;

        Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| ImpactClickError::sealing("failed to unseal payload"))
    }
}

impl std::fmt::Debug for Sealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealer").finish_non_exhaustive()
    }
}

//! State token encryption for the OAuth login hop.
//!
//! Tokens are AES-256-GCM sealed payloads encoded as URL-safe base64 of
//! `<nonce><ciphertext+tag>`, so they can ride in a query string untouched.
//! Any modification of the token, or a different key, fails authentication.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use async_trait::async_trait;
use audience_core::{AudienceError, AudienceResult, HubConfig};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

// ---------------------------------------------------------------------------
// Cipher trait
// ---------------------------------------------------------------------------

/// Encrypts and decrypts opaque payloads handed to third parties.
#[async_trait]
pub trait PayloadCipher: Send + Sync {
    async fn encrypt(&self, plaintext: &str) -> AudienceResult<String>;

    async fn decrypt(&self, token: &str) -> AudienceResult<String>;
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// 256-bit symmetric key for state tokens.
#[derive(Clone)]
pub struct CipherKey {
    bytes: [u8; KEY_LEN],
}

impl CipherKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Encode the key to base64 for storage in configuration.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    /// Decode a key from base64.
    pub fn from_base64(encoded: &str) -> AudienceResult<Self> {
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AudienceError::Config(format!("cipher key is not valid base64: {e}")))?;
        let bytes: [u8; KEY_LEN] = decoded.try_into().map_err(|raw: Vec<u8>| {
            AudienceError::Config(format!(
                "cipher key must be {KEY_LEN} bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self { bytes })
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

// ---------------------------------------------------------------------------
// AES-GCM cipher
// ---------------------------------------------------------------------------

pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    pub fn new(key: &CipherKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.bytes)),
        }
    }

    /// Build a cipher from the configured `cipher_master` key.
    pub fn from_config(config: &HubConfig) -> AudienceResult<Self> {
        let encoded = config
            .cipher_master
            .as_deref()
            .ok_or_else(|| AudienceError::Config("cipher_master is not set".into()))?;
        Ok(Self::new(&CipherKey::from_base64(encoded)?))
    }

    fn seal(&self, plaintext: &[u8]) -> AudienceResult<String> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce);

        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| AudienceError::Encryption("AES-GCM seal failed".into()))?;

        let mut token = Vec::with_capacity(NONCE_LEN + sealed.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&sealed);
        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    fn open(&self, token: &str) -> AudienceResult<Vec<u8>> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| AudienceError::Decryption(format!("token is not valid base64: {e}")))?;
        if raw.len() <= NONCE_LEN {
            return Err(AudienceError::Decryption("token is truncated".into()));
        }

        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| AudienceError::Decryption("authentication failed, token may be tampered".into()))
    }
}

#[async_trait]
impl PayloadCipher for AesGcmCipher {
    async fn encrypt(&self, plaintext: &str) -> AudienceResult<String> {
        self.seal(plaintext.as_bytes())
    }

    async fn decrypt(&self, token: &str) -> AudienceResult<String> {
        let plaintext = self.open(token)?;
        String::from_utf8(plaintext)
            .map_err(|_| AudienceError::Decryption("payload is not UTF-8".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

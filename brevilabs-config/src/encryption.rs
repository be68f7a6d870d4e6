//! License key encryption at rest.
//!
//! Keys are sealed with AES-256-GCM under a machine-derived key built from:
//! - Machine hostname
//! - User ID (where available)
//! - A static salt
//!
//! Encrypted keys are stored as `enc_` followed by base64 of the nonce and
//! the ciphertext (tag appended). Anything without the prefix is treated as
//! a plain key so settings written by hand keep working.

use anyhow::{Context, Result, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};
use brevilabs_commons::KeyDecryptor;
use ring::aead::{self, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::digest::{SHA256, digest};
use ring::rand::{SecureRandom, SystemRandom};

pub const ENCRYPTED_PREFIX: &str = "enc_";

const KEY_SALT: &[u8] = b"brevilabs-license-key-v1";

/// Seals and opens license keys.
pub struct KeyCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for KeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCipher").finish_non_exhaustive()
    }
}

impl KeyCipher {
    /// Cipher keyed to the current machine and user.
    pub fn for_machine() -> Result<Self> {
        let mut key_material = Vec::new();

        if let Ok(hostname) = hostname::get() {
            key_material.extend_from_slice(hostname.as_encoded_bytes());
        }

        #[cfg(unix)]
        {
            key_material.extend_from_slice(&nix::unistd::getuid().as_raw().to_le_bytes());
        }
        #[cfg(not(unix))]
        {
            if let Ok(user) = std::env::var("USER").or_else(|_| std::env::var("USERNAME")) {
                key_material.extend_from_slice(user.as_bytes());
            }
        }

        Self::from_secret(&key_material)
    }

    /// Cipher keyed to arbitrary secret material.
    pub fn from_secret(secret: &[u8]) -> Result<Self> {
        let mut material = secret.to_vec();
        material.extend_from_slice(KEY_SALT);

        let hash = digest(&SHA256, &material);
        let unbound = UnboundKey::new(&aead::AES_256_GCM, hash.as_ref())
            .map_err(|_| anyhow!("Invalid key length"))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    pub fn is_encrypted(stored: &str) -> bool {
        stored.starts_with(ENCRYPTED_PREFIX)
    }

    /// Encrypt a plain license key for storage.
    pub fn encrypt(&self, plain: &str) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| anyhow!("Failed to generate nonce"))?;

        let mut sealed = plain.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut sealed,
            )
            .map_err(|_| anyhow!("Encryption failed"))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);

        Ok(format!("{ENCRYPTED_PREFIX}{}", STANDARD.encode(payload)))
    }

    /// Decrypt a stored license key. Plain keys are returned unchanged.
    pub fn decrypt(&self, stored: &str) -> Result<String> {
        let Some(encoded) = stored.strip_prefix(ENCRYPTED_PREFIX) else {
            return Ok(stored.to_string());
        };

        let payload = STANDARD
            .decode(encoded)
            .context("Invalid encrypted key encoding")?;
        if payload.len() < NONCE_LEN {
            return Err(anyhow!("Encrypted key is truncated"));
        }

        let (nonce_bytes, sealed) = payload.split_at(NONCE_LEN);
        let nonce_bytes: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| anyhow!("Invalid nonce length"))?;

        let mut sealed = sealed.to_vec();
        let plain = self
            .key
            .open_in_place(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut sealed,
            )
            .map_err(|_| {
                anyhow!("Decryption failed - key may be corrupted or from a different machine")
            })?;

        String::from_utf8(plain.to_vec()).context("Decrypted key is not valid UTF-8")
    }
}

impl KeyDecryptor for KeyCipher {
    fn decrypt(&self, stored: &str) -> Result<String> {
        KeyCipher::decrypt(self, stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_roundtrip() {
        let cipher = KeyCipher::from_secret(b"test-machine").unwrap();
        let sealed = cipher.encrypt("plus-license-12345").unwrap();

        assert!(KeyCipher::is_encrypted(&sealed));
        assert!(!sealed.contains("plus-license-12345"));
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "plus-license-12345");
    }

    #[test]
    fn test_machine_cipher_roundtrip() {
        let cipher = KeyCipher::for_machine().unwrap();
        let sealed = cipher.encrypt("machine-key").unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "machine-key");
    }

    #[test]
    fn test_nonce_is_fresh_per_encryption() {
        let cipher = KeyCipher::from_secret(b"test-machine").unwrap();
        let first = cipher.encrypt("same").unwrap();
        let second = cipher.encrypt("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_plain_key_passes_through() {
        let cipher = KeyCipher::from_secret(b"test-machine").unwrap();
        assert_eq!(cipher.decrypt("plain-key").unwrap(), "plain-key");
    }

    #[test]
    fn test_other_machine_cannot_decrypt() {
        let ours = KeyCipher::from_secret(b"machine-a").unwrap();
        let theirs = KeyCipher::from_secret(b"machine-b").unwrap();

        let sealed = ours.encrypt("secret").unwrap();
        let err = theirs.decrypt(&sealed).unwrap_err();
        assert!(err.to_string().contains("different machine"));
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let cipher = KeyCipher::from_secret(b"test-machine").unwrap();
        let stored = format!("{ENCRYPTED_PREFIX}{}", STANDARD.encode([1u8, 2, 3]));
        assert!(cipher.decrypt(&stored).is_err());
    }

    #[test]
    fn test_usable_as_key_decryptor() {
        let cipher = KeyCipher::from_secret(b"test-machine").unwrap();
        let sealed = cipher.encrypt("via-trait").unwrap();
        let decryptor: &dyn KeyDecryptor = &cipher;
        assert_eq!(decryptor.decrypt(&sealed).unwrap(), "via-trait");
    }
}

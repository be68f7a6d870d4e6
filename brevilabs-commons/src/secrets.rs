use anyhow::Result;

/// Turns a stored license key into the value sent over the wire.
///
/// Implementations may fail (corrupted ciphertext, key material from another
/// machine); callers propagate the error instead of falling back to the
/// stored form.
pub trait KeyDecryptor: Send + Sync {
    fn decrypt(&self, stored: &str) -> Result<String>;
}

/// Decryptor for hosts that keep license keys in plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainKeyDecryptor;

impl KeyDecryptor for PlainKeyDecryptor {
    fn decrypt(&self, stored: &str) -> Result<String> {
        Ok(stored.to_string())
    }
}

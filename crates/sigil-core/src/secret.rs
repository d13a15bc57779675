//! Signing key material with controlled exposure.
//!
//! A [`ProtectedSecret`] owns its own copy of the key bytes. The bytes are
//! only reachable through [`ProtectedSecret::expose`], which hands out a
//! borrowed [`SecretView`] that cannot outlive the secret, and they are
//! zeroed when the secret is disposed or dropped.
//!
//! # Security
//!
//! - `Debug` output is redacted
//! - No `Clone`, `Copy` or `Serialize` implementations
//! - Storage owned by the secret is wiped with [`zeroize`] on drop and dispose
//!
//! Signers may build their own key objects from a [`SecretView`]. The
//! `jsonwebtoken` keys used by the default signer copy the bytes into buffers
//! that are freed without zeroizing, so those per-call copies are not covered.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroize;

use crate::errors::TokenError;

/// Key material used to sign and verify tokens.
pub struct ProtectedSecret {
    bytes: Vec<u8>,
}

impl ProtectedSecret {
    /// Copies `key` into protected storage.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSecretKey`] if `key` is empty.
    pub fn wrap(key: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TokenError::InvalidSecretKey);
        }

        Ok(Self {
            bytes: key.to_vec(),
        })
    }

    /// Borrows the key bytes for the duration of a sign or verify call.
    pub fn expose(&self) -> SecretView<'_> {
        SecretView { bytes: &self.bytes }
    }

    /// Wipes the key material and releases the secret.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for ProtectedSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for ProtectedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectedSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Short-lived read-only view of a [`ProtectedSecret`].
pub struct SecretView<'a> {
    bytes: &'a [u8],
}

impl SecretView<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}

impl Deref for SecretView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for SecretView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretView([REDACTED])")
    }
}

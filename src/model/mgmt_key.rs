//! Management Key type for YubiKey PIV authentication
//!
//! This module defines a domain type for the PIV Management Key and
//! provides idiomatic conversions to the yubikey crate's `MgmKey`.

use std::convert::TryFrom;
use std::fmt;

use rand::RngCore;
use thiserror::Error;
use yubikey::MgmKey;
use zeroize::Zeroize;

/// Management Key for YubiKey PIV authentication
///
/// A Management Key is a 24-byte key (3 DES keys of 8 bytes each) used to
/// authenticate for configuration changes on the YubiKey.
/// In PIN-protected mode a freshly generated key is stored on the device
/// behind the PIN, so the key itself never has to leave the token.
#[derive(Clone, PartialEq, Eq)]
pub struct ManagementKey([u8; 24]);

impl ManagementKey {
    /// Management Key length in bytes
    pub const LENGTH: usize = 24;

    /// Factory-default PIV management key
    pub const DEFAULT: ManagementKey = ManagementKey([
        1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4, 5, 6, 7, 8,
    ]);

    pub const fn new(key: [u8; 24]) -> Self {
        Self(key)
    }

    /// Generate a random Management Key
    pub fn random() -> Self {
        let mut bytes = [0u8; 24];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create a Management Key from a byte slice
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly 24 bytes
    pub fn from_slice(key: &[u8]) -> Result<Self, ManagementKeyError> {
        if key.len() != Self::LENGTH {
            return Err(ManagementKeyError::InvalidLength {
                expected: Self::LENGTH,
                actual: key.len(),
            });
        }
        let mut bytes = [0u8; 24];
        bytes.copy_from_slice(key);
        Ok(Self(bytes))
    }

    pub fn is_default(&self) -> bool {
        self == &Self::DEFAULT
    }

    /// Get the Management Key as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for ManagementKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for ManagementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ManagementKey([REDACTED])")
    }
}

/// Errors that can occur when creating or converting a Management Key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagementKeyError {
    /// Management Key has invalid length
    #[error("Management Key must be exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Underlying yubikey crate rejected the key material
    #[error("Invalid Management Key material: {reason}")]
    InvalidMaterial { reason: String },
}

/// Fallible conversion from domain `ManagementKey` to yubikey crate's `MgmKey`.
///
/// The yubikey crate refuses weak 3DES keys, so a random key can fail here.
impl TryFrom<&ManagementKey> for MgmKey {
    type Error = ManagementKeyError;

    fn try_from(key: &ManagementKey) -> Result<Self, Self::Error> {
        if key.is_default() {
            return Ok(MgmKey::default());
        }
        MgmKey::from_bytes(key.as_bytes()).map_err(|e| ManagementKeyError::InvalidMaterial {
            reason: e.to_string(),
        })
    }
}

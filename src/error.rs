//! Error types for ykpinonly
//!
//! This module defines the error hierarchy for all provisioning operations.
//! Errors are organized hierarchically and use thiserror for implementation.

use thiserror::Error;

use crate::model::KeyEntryRequest;

/// Result type alias for ykpinonly operations
///
/// This is a convenience alias for `Result<T, PinOnlyError>`.
pub type PinOnlyResult<T> = Result<T, PinOnlyError>;

/// Top-level error type for all ykpinonly operations
#[derive(Error, Debug)]
pub enum PinOnlyError {
    /// Invalid command-line usage
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// YubiKey device errors
    #[error("YubiKey device error: {0}")]
    Device(#[from] DeviceError),

    /// Credential negotiation errors
    #[error("Key entry error: {0}")]
    KeyEntry(#[from] KeyEntryError),

    /// Pin-only mode configuration errors
    #[error("Pin-only mode error: {0}")]
    PinOnlyMode(#[from] PinOnlyModeError),

    /// Domain validation errors
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),
}

/// Errors caused by how the tool was invoked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// No serial number was given
    #[error("serial number required: pass the serial of the security key to provision")]
    MissingSerial,
}

/// YubiKey device-related errors
#[derive(Error, Debug)]
pub enum DeviceError {
    /// No attached YubiKey reports the requested serial
    #[error("There is no key attached with serial number {serial}")]
    NotFound { serial: String },

    /// YubiKey device connection failed
    #[error("Failed to connect to YubiKey device: {reason}")]
    ConnectionFailed { reason: String },

    /// Management key authentication failed
    #[error("YubiKey authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    /// PIN verification failed for a reason other than a wrong PIN
    #[error("PIN verification failed: {reason}")]
    PinVerificationFailed { reason: String },

    /// YubiKey PIV applet is locked
    #[error("YubiKey is locked - too many failed PIN attempts")]
    DeviceLocked,

    /// Underlying yubikey crate error
    #[error("YubiKey library error: {0}")]
    YubikeyLib(String),
}

/// Errors raised while negotiating credentials between a session and its collector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyEntryError {
    /// The device rejected the factory-default PIN
    #[error("The PIV PIN is not the default PIN. Reset the device first")]
    PinNotDefault,

    /// The collector declined to handle a request
    #[error("Credential request {request} was not handled, authentication canceled")]
    Canceled { request: KeyEntryRequest },

    /// The collector accepted a request but submitted nothing
    #[error("Credential request {request} was accepted but no value was submitted")]
    NoValue { request: KeyEntryRequest },

    /// An empty value was submitted
    #[error("Submitted credential value is empty")]
    EmptyValue,

    /// The session has no collector to ask
    #[error("No key collector registered on the session")]
    NoCollector,
}

/// Errors while changing the pin-only mode of the device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinOnlyModeError {
    /// The requested mode cannot be set by this tool
    #[error("Pin-only mode not supported: {mode}")]
    Unsupported { mode: String },

    /// Storing the PIN-protected management key failed
    #[error("Failed to store PIN-protected management key: {reason}")]
    StoreFailed { reason: String },
}

/// Domain validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// PIN validation error
    #[error("PIN validation error: {0}")]
    Pin(#[from] crate::model::PinError),

    /// Management Key error
    #[error("Management Key error: {0}")]
    ManagementKey(#[from] crate::model::ManagementKeyError),

    /// Serial number error
    #[error("Serial number error: {0}")]
    Serial(#[from] crate::model::SerialError),
}

impl From<crate::model::PinError> for PinOnlyError {
    fn from(err: crate::model::PinError) -> Self {
        PinOnlyError::Domain(DomainError::Pin(err))
    }
}

impl From<crate::model::ManagementKeyError> for PinOnlyError {
    fn from(err: crate::model::ManagementKeyError) -> Self {
        PinOnlyError::Domain(DomainError::ManagementKey(err))
    }
}

/// An empty serial is a usage mistake, not a lookup failure
impl From<crate::model::SerialError> for PinOnlyError {
    fn from(err: crate::model::SerialError) -> Self {
        match err {
            crate::model::SerialError::Empty => PinOnlyError::Usage(UsageError::MissingSerial),
        }
    }
}

/// Convert yubikey crate errors to our error type
impl From<yubikey::Error> for PinOnlyError {
    fn from(err: yubikey::Error) -> Self {
        PinOnlyError::Device(DeviceError::YubikeyLib(err.to_string()))
    }
}

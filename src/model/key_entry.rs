//! Credential requests exchanged between a PIV session and its key collector
//!
//! A session builds one [`KeyEntryData`] per authentication step and hands it
//! to the registered collector. The request borrows a [`Submission`] owned by
//! the session; [`KeyEntryData::submit_value`] consumes the request, so a
//! collector can write at most once per request.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{KeyEntryError, PinOnlyResult};

/// Purpose of a credential request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEntryRequest {
    /// The operation finished; release anything held for it
    Release,
    /// Supply the current PIV PIN
    VerifyPivPin,
    /// Supply the current management key
    AuthenticatePivManagementKey,
    /// Supply the current and a new PIV PIN
    ChangePivPin,
    /// Supply the current and a new PUK
    ChangePivPuk,
    /// Supply the PUK and a new PIN
    ResetPivPinWithPuk,
    /// Supply the current and a new management key
    ChangePivManagementKey,
}

impl fmt::Display for KeyEntryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyEntryRequest::Release => "release",
            KeyEntryRequest::VerifyPivPin => "verify-piv-pin",
            KeyEntryRequest::AuthenticatePivManagementKey => "authenticate-piv-management-key",
            KeyEntryRequest::ChangePivPin => "change-piv-pin",
            KeyEntryRequest::ChangePivPuk => "change-piv-puk",
            KeyEntryRequest::ResetPivPinWithPuk => "reset-piv-pin-with-puk",
            KeyEntryRequest::ChangePivManagementKey => "change-piv-management-key",
        };
        f.write_str(name)
    }
}

/// Session-owned slot receiving the value a collector submits
#[derive(Default)]
pub struct Submission(Option<Zeroizing<Vec<u8>>>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Take the submitted value, leaving the slot empty
    pub fn take(&mut self) -> Option<Zeroizing<Vec<u8>>> {
        self.0.take()
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => write!(f, "Submission([REDACTED])"),
            None => write!(f, "Submission(None)"),
        }
    }
}

/// One credential request from a session
pub struct KeyEntryData<'a> {
    request: KeyEntryRequest,
    is_retry: bool,
    retries_remaining: Option<u8>,
    submission: &'a mut Submission,
}

impl<'a> KeyEntryData<'a> {
    pub fn new(
        request: KeyEntryRequest,
        is_retry: bool,
        retries_remaining: Option<u8>,
        submission: &'a mut Submission,
    ) -> Self {
        Self {
            request,
            is_retry,
            retries_remaining,
            submission,
        }
    }

    pub fn request(&self) -> KeyEntryRequest {
        self.request
    }

    /// True when the device rejected the previous value for this attempt
    pub fn is_retry(&self) -> bool {
        self.is_retry
    }

    /// Attempts left before the device locks, when the device reported it
    pub fn retries_remaining(&self) -> Option<u8> {
        self.retries_remaining
    }

    /// Hand the credential for this request to the session
    ///
    /// # Errors
    ///
    /// Returns `KeyEntryError::EmptyValue` if `value` is empty; nothing is stored.
    pub fn submit_value(self, value: &[u8]) -> PinOnlyResult<()> {
        if value.is_empty() {
            return Err(KeyEntryError::EmptyValue.into());
        }
        self.submission.0 = Some(Zeroizing::new(value.to_vec()));
        Ok(())
    }
}

impl fmt::Debug for KeyEntryData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEntryData")
            .field("request", &self.request)
            .field("is_retry", &self.is_retry)
            .field("retries_remaining", &self.retries_remaining)
            .finish_non_exhaustive()
    }
}

//! Session side of the credential negotiation
//!
//! Sessions use these helpers to ask their key collector for values, so every
//! session implementation builds requests and computes the retry flag the same way.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::error::{DeviceError, KeyEntryError, PinOnlyResult};
use crate::model::{KeyEntryData, KeyEntryRequest, ManagementKey, Submission};
use crate::ports::KeyCollector;

/// Device answer to a PIN verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCheck {
    Accepted,
    Wrong { retries: u8 },
}

/// Ask the collector for one value
fn request_value(
    collector: &dyn KeyCollector,
    request: KeyEntryRequest,
    is_retry: bool,
    retries_remaining: Option<u8>,
) -> PinOnlyResult<Zeroizing<Vec<u8>>> {
    let mut submission = Submission::new();
    let data = KeyEntryData::new(request, is_retry, retries_remaining, &mut submission);

    if !collector.collect(Some(data))? {
        return Err(KeyEntryError::Canceled { request }.into());
    }

    submission
        .take()
        .ok_or_else(|| KeyEntryError::NoValue { request }.into())
}

/// Verify the PIV PIN with values from the collector
///
/// Every value the device rejects is followed by a retry request carrying the
/// remaining attempt count. The loop ends when the device accepts a value, the
/// collector stops, or the device reports no attempts left.
pub fn verify_pin<V>(collector: &dyn KeyCollector, mut verify: V) -> PinOnlyResult<()>
where
    V: FnMut(&[u8]) -> PinOnlyResult<PinCheck>,
{
    let mut is_retry = false;
    let mut retries_remaining = None;

    loop {
        let pin = request_value(
            collector,
            KeyEntryRequest::VerifyPivPin,
            is_retry,
            retries_remaining,
        )?;

        match verify(pin.as_slice())? {
            PinCheck::Accepted => {
                debug!("PIN verified");
                return Ok(());
            }
            PinCheck::Wrong { retries: 0 } => {
                warn!("PIN rejected, no attempts left");
                return Err(DeviceError::DeviceLocked.into());
            }
            PinCheck::Wrong { retries } => {
                warn!(retries, "PIN rejected");
                is_retry = true;
                retries_remaining = Some(retries);
            }
        }
    }
}

/// Authenticate with the management key
///
/// The factory-default key is tried first without involving the collector.
/// `authenticate` returns `Ok(false)` when the device rejects a key.
pub fn authenticate_management_key<A>(
    collector: &dyn KeyCollector,
    mut authenticate: A,
) -> PinOnlyResult<()>
where
    A: FnMut(&ManagementKey) -> PinOnlyResult<bool>,
{
    if authenticate(&ManagementKey::DEFAULT)? {
        debug!("authenticated with default management key");
        return Ok(());
    }

    debug!("default management key rejected, asking key collector");
    let mut is_retry = false;
    loop {
        let value = request_value(
            collector,
            KeyEntryRequest::AuthenticatePivManagementKey,
            is_retry,
            None,
        )?;
        let key = ManagementKey::from_slice(value.as_slice())?;

        if authenticate(&key)? {
            debug!("authenticated with collected management key");
            return Ok(());
        }
        is_retry = true;
    }
}

/// Tell the collector the operation is over
pub fn release(collector: &dyn KeyCollector) -> PinOnlyResult<()> {
    let mut submission = Submission::new();
    let data = KeyEntryData::new(KeyEntryRequest::Release, false, None, &mut submission);
    collector.collect(Some(data))?;
    Ok(())
}

/// Release the collector after an operation
///
/// The operation's own error takes precedence over a release error.
pub fn finish<T>(collector: &dyn KeyCollector, result: PinOnlyResult<T>) -> PinOnlyResult<T> {
    let released = release(collector);
    let value = result?;
    released?;
    Ok(value)
}

//! Key collector that only ever offers the factory-default PIN
//!
//! The collector is stateless: its answer depends on the request kind and the
//! retry flag alone. A retry means the device rejected `123456`, so the PIN was
//! changed and the device has to be reset before it can be provisioned. Trying
//! again would only burn PIN attempts towards a lockout, so a retry is fatal.

use tracing::{debug, warn};

use crate::error::{KeyEntryError, PinOnlyResult};
use crate::model::{KeyEntryData, KeyEntryRequest, Pin};
use crate::ports::KeyCollector;

const DEFAULT_PIN: &[u8] = Pin::DEFAULT;

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPinCollector;

impl KeyCollector for DefaultPinCollector {
    fn collect(&self, data: Option<KeyEntryData<'_>>) -> PinOnlyResult<bool> {
        let Some(data) = data else {
            debug!("empty key entry request");
            return Ok(false);
        };

        if data.is_retry() {
            warn!(
                request = %data.request(),
                retries_remaining = ?data.retries_remaining(),
                "device rejected the default PIN"
            );
            return Err(KeyEntryError::PinNotDefault.into());
        }

        match data.request() {
            KeyEntryRequest::Release => {
                debug!("key entry released");
                Ok(true)
            }
            KeyEntryRequest::VerifyPivPin => {
                data.submit_value(DEFAULT_PIN)?;
                debug!("submitted default PIN");
                Ok(true)
            }
            other => {
                debug!(request = %other, "refusing key entry request");
                Ok(false)
            }
        }
    }
}

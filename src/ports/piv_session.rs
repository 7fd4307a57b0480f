//! PivDevice and PivSession traits - opening a device and changing its mode

use super::KeyCollector;
use crate::error::PinOnlyResult;
use crate::model::{PinOnlyMode, SerialNumber};

/// An attached device that can be opened for PIV operations
pub trait PivDevice {
    type Session: PivSession;

    fn serial(&self) -> SerialNumber;

    /// Take exclusive ownership of the device for a session
    ///
    /// The device is released when the session is dropped.
    fn open_session(self) -> PinOnlyResult<Self::Session>;
}

/// An open PIV session on one device
pub trait PivSession {
    /// Register the credential source used by every later operation
    fn set_key_collector(&mut self, collector: Box<dyn KeyCollector>);

    /// Read the current pin-only mode from the device
    fn pin_only_mode(&mut self) -> PinOnlyResult<PinOnlyMode>;

    /// Put the device into `mode`
    ///
    /// Authenticates through the registered collector as needed.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - No collector is registered
    /// - The mode is not supported
    /// - The collector refuses a request or raises an error
    /// - The device rejects the credentials or the configuration change
    fn set_pin_only_mode(&mut self, mode: PinOnlyMode) -> PinOnlyResult<()>;
}

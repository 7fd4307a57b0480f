//! Provision use case
//!
//! This use case puts one YubiKey, chosen by serial number, into
//! PIN-protected pin-only mode using the factory-default PIN.

use tracing::{debug, info};

use crate::error::PinOnlyResult;
use crate::logic::DefaultPinCollector;
use crate::model::{PinOnlyMode, SerialNumber};
use crate::ports::{DeviceFinder, PivDevice, PivSession};

/// Set the device with the given serial to PIN-protected mode
///
/// This function orchestrates the complete provisioning workflow:
/// 1. Validate the serial number
/// 2. Find the attached device with exactly that serial
/// 3. Open a PIV session and register the default-PIN key collector
/// 4. Set pin-only mode to PIN-protected
///
/// The session is released on every exit path.
///
/// # Errors
///
/// Returns errors if:
/// - The serial number is empty (usage error, before any device lookup)
/// - No attached device has that serial
/// - The device PIN is not the default (the device must be reset first)
/// - The device rejects the configuration change
pub fn provision<F>(finder: &F, serial: &str) -> PinOnlyResult<()>
where
    F: DeviceFinder,
{
    let serial = SerialNumber::new(serial)?;

    let device = finder.find_by_serial(&serial)?;
    debug!("Found YubiKey {}", serial);

    let mut session = device.open_session()?;
    session.set_key_collector(Box::new(DefaultPinCollector));
    session.set_pin_only_mode(PinOnlyMode::PinProtected)?;

    info!("YubiKey {} is PIN-protected", serial);
    Ok(())
}

//! PIV (Personal Identity Verification) implementation of the provisioning ports
//!
//! This module provides concrete implementations of the device and session
//! traits using the yubikey crate's PC/SC and PIV functionality.

use tracing::{debug, info};
use yubikey::{Context, MgmKey, YubiKey};

use crate::error::{DeviceError, KeyEntryError, PinOnlyError, PinOnlyModeError, PinOnlyResult};
use crate::logic::negotiate::{self, PinCheck};
use crate::model::{ManagementKey, PinOnlyMode, SerialNumber};
use crate::ports::{DeviceFinder, KeyCollector, PivDevice, PivSession};

/// PIV-based YubiKey device finder
///
/// Finds and connects to YubiKey devices using PC/SC.
#[derive(Debug, Clone, Default)]
pub struct PivDeviceFinder;

impl DeviceFinder for PivDeviceFinder {
    type Device = PivYubiKey;

    fn find_all(&self) -> PinOnlyResult<Vec<Self::Device>> {
        let mut readers = Context::open().map_err(|e| {
            PinOnlyError::Device(DeviceError::ConnectionFailed {
                reason: format!("Failed to open PC/SC context: {}", e),
            })
        })?;

        let mut devices = Vec::new();
        for reader in readers.iter().map_err(|e| {
            PinOnlyError::Device(DeviceError::ConnectionFailed {
                reason: format!("Failed to iterate readers: {}", e),
            })
        })? {
            match reader.open() {
                Ok(yk) => {
                    debug!("Connected to YubiKey {} on {:?}", yk.serial(), reader.name());
                    devices.push(PivYubiKey::new(yk));
                }
                Err(e) => debug!("Skipping reader {:?}: {}", reader.name(), e),
            }
        }

        Ok(devices)
    }
}

/// PIV-based YubiKey device handle
#[derive(Debug)]
pub struct PivYubiKey {
    device: YubiKey,
}

impl PivYubiKey {
    pub fn new(device: YubiKey) -> Self {
        Self { device }
    }
}

impl PivDevice for PivYubiKey {
    type Session = YubiKeyPivSession;

    fn serial(&self) -> SerialNumber {
        self.device.serial().into()
    }

    fn open_session(self) -> PinOnlyResult<Self::Session> {
        debug!("Opening PIV session on YubiKey {}", self.device.serial());
        Ok(YubiKeyPivSession {
            device: self.device,
            collector: None,
        })
    }
}

/// PIV session owning one YubiKey
///
/// The PC/SC handle is released when the session is dropped.
pub struct YubiKeyPivSession {
    device: YubiKey,
    collector: Option<Box<dyn KeyCollector>>,
}

impl PivSession for YubiKeyPivSession {
    fn set_key_collector(&mut self, collector: Box<dyn KeyCollector>) {
        self.collector = Some(collector);
    }

    fn pin_only_mode(&mut self) -> PinOnlyResult<PinOnlyMode> {
        current_mode(&mut self.device)
    }

    fn set_pin_only_mode(&mut self, mode: PinOnlyMode) -> PinOnlyResult<()> {
        if mode != PinOnlyMode::PinProtected {
            return Err(PinOnlyModeError::Unsupported {
                mode: mode.to_string(),
            }
            .into());
        }

        let Self { device, collector } = self;
        let collector = collector.as_deref().ok_or(KeyEntryError::NoCollector)?;

        let result = set_pin_protected(device, collector);
        negotiate::finish(collector, result)
    }
}

impl Drop for YubiKeyPivSession {
    fn drop(&mut self) {
        debug!("Releasing PIV session on YubiKey {}", self.device.serial());
    }
}

fn current_mode(device: &mut YubiKey) -> PinOnlyResult<PinOnlyMode> {
    let config = device.config()?;
    Ok(PinOnlyMode::from_yubikey_mgm_type(config.mgm_type))
}

fn set_pin_protected(device: &mut YubiKey, collector: &dyn KeyCollector) -> PinOnlyResult<()> {
    if current_mode(device)? == PinOnlyMode::PinProtected {
        info!("YubiKey {} is already PIN-protected", device.serial());
        return Ok(());
    }

    negotiate::verify_pin(collector, |pin| match device.verify_pin(pin) {
        Ok(()) => Ok(PinCheck::Accepted),
        Err(yubikey::Error::WrongPin { tries }) => Ok(PinCheck::Wrong { retries: tries }),
        Err(yubikey::Error::PinLocked) => Err(DeviceError::DeviceLocked.into()),
        Err(e) => Err(DeviceError::PinVerificationFailed {
            reason: e.to_string(),
        }
        .into()),
    })?;

    negotiate::authenticate_management_key(collector, |key| {
        let mgm_key = MgmKey::try_from(key)?;
        match device.authenticate(mgm_key) {
            Ok(()) => Ok(true),
            Err(yubikey::Error::AuthenticationError) => Ok(false),
            Err(e) => Err(DeviceError::AuthenticationFailed {
                reason: format!("Management key authentication failed: {}", e),
            }
            .into()),
        }
    })?;

    let mgm_key = generate_management_key();
    mgm_key.set_protected(device).map_err(|e| {
        PinOnlyError::PinOnlyMode(PinOnlyModeError::StoreFailed {
            reason: e.to_string(),
        })
    })?;

    info!("YubiKey {} set to PIN-protected mode", device.serial());
    Ok(())
}

/// Random management key the device will accept
fn generate_management_key() -> MgmKey {
    loop {
        match MgmKey::try_from(&ManagementKey::random()) {
            Ok(key) => return key,
            Err(e) => debug!("Discarding generated management key: {}", e),
        }
    }
}

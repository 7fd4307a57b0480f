//! In-memory YubiKey for exercising the ports without hardware
//!
//! Clones of a `FakeYubiKey` share one device state, so a test can keep a
//! handle and inspect the device after a session consumed its copy.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{DeviceError, KeyEntryError, PinOnlyError, PinOnlyModeError, PinOnlyResult};
use crate::logic::negotiate::{self, PinCheck};
use crate::model::{ManagementKey, Pin, PinOnlyMode, SerialNumber};
use crate::ports::{DeviceFinder, KeyCollector, PivDevice, PivSession};

const PIN_ATTEMPTS: u8 = 3;

#[derive(Debug)]
pub struct FakeState {
    pub pin: Pin,
    pub pin_retries: u8,
    pub mgmt_key: ManagementKey,
    pub protected_mgmt_key: Option<ManagementKey>,
    pub mode: PinOnlyMode,
    pub pin_verified: bool,
    pub authenticated: bool,
    pub pin_attempts: usize,
    pub open_sessions: usize,
}

#[derive(Debug, Clone)]
pub struct FakeYubiKey {
    serial: u32,
    state: Rc<RefCell<FakeState>>,
}

impl FakeYubiKey {
    pub fn new(serial: u32, pin: Pin) -> Self {
        Self {
            serial,
            state: Rc::new(RefCell::new(FakeState {
                pin,
                pin_retries: PIN_ATTEMPTS,
                mgmt_key: ManagementKey::DEFAULT,
                protected_mgmt_key: None,
                mode: PinOnlyMode::None,
                pin_verified: false,
                authenticated: false,
                pin_attempts: 0,
                open_sessions: 0,
            })),
        }
    }

    /// Fresh device with factory-default credentials
    pub fn factory(serial: u32) -> Self {
        Self::new(serial, Pin::default())
    }

    pub fn with_mgmt_key(self, mgmt_key: ManagementKey) -> Self {
        self.state.borrow_mut().mgmt_key = mgmt_key;
        self
    }

    pub fn with_mode(self, mode: PinOnlyMode) -> Self {
        self.state.borrow_mut().mode = mode;
        self
    }

    pub fn state(&self) -> std::cell::Ref<'_, FakeState> {
        self.state.borrow()
    }
}

impl PivDevice for FakeYubiKey {
    type Session = FakeSession;

    fn serial(&self) -> SerialNumber {
        self.serial.into()
    }

    fn open_session(self) -> PinOnlyResult<Self::Session> {
        self.state.borrow_mut().open_sessions += 1;
        Ok(FakeSession {
            state: self.state,
            collector: None,
        })
    }
}

pub struct FakeSession {
    state: Rc<RefCell<FakeState>>,
    collector: Option<Box<dyn KeyCollector>>,
}

impl FakeSession {
    fn verify_pin(&self, pin: &[u8]) -> PinOnlyResult<PinCheck> {
        let mut state = self.state.borrow_mut();
        state.pin_attempts += 1;

        if state.pin_retries == 0 {
            return Err(DeviceError::DeviceLocked.into());
        }
        if pin == state.pin.as_bytes() {
            state.pin_retries = PIN_ATTEMPTS;
            state.pin_verified = true;
            Ok(PinCheck::Accepted)
        } else {
            state.pin_retries -= 1;
            Ok(PinCheck::Wrong {
                retries: state.pin_retries,
            })
        }
    }

    fn authenticate(&self, key: &ManagementKey) -> bool {
        let mut state = self.state.borrow_mut();
        state.authenticated = key == &state.mgmt_key;
        state.authenticated
    }

    fn set_pin_protected(&self, collector: &dyn KeyCollector) -> PinOnlyResult<()> {
        if self.state.borrow().mode == PinOnlyMode::PinProtected {
            return Ok(());
        }

        negotiate::verify_pin(collector, |pin| self.verify_pin(pin))?;
        negotiate::authenticate_management_key(collector, |key| Ok(self.authenticate(key)))?;

        let mut state = self.state.borrow_mut();
        if !(state.pin_verified && state.authenticated) {
            return Err(PinOnlyModeError::StoreFailed {
                reason: "security status not satisfied".to_string(),
            }
            .into());
        }
        let new_key = ManagementKey::random();
        state.mgmt_key = new_key.clone();
        state.protected_mgmt_key = Some(new_key);
        state.mode = PinOnlyMode::PinProtected;
        Ok(())
    }
}

impl PivSession for FakeSession {
    fn set_key_collector(&mut self, collector: Box<dyn KeyCollector>) {
        self.collector = Some(collector);
    }

    fn pin_only_mode(&mut self) -> PinOnlyResult<PinOnlyMode> {
        Ok(self.state.borrow().mode)
    }

    fn set_pin_only_mode(&mut self, mode: PinOnlyMode) -> PinOnlyResult<()> {
        if mode != PinOnlyMode::PinProtected {
            return Err(PinOnlyModeError::Unsupported {
                mode: mode.to_string(),
            }
            .into());
        }
        let collector = self
            .collector
            .as_deref()
            .ok_or(PinOnlyError::KeyEntry(KeyEntryError::NoCollector))?;

        let result = self.set_pin_protected(collector);
        negotiate::finish(collector, result)
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.state.borrow_mut().open_sessions -= 1;
    }
}

/// Finder over a fixed set of fake devices
#[derive(Debug, Default)]
pub struct FakeDeviceFinder {
    pub devices: Vec<FakeYubiKey>,
    pub lookups: Cell<usize>,
}

impl FakeDeviceFinder {
    pub fn new(devices: Vec<FakeYubiKey>) -> Self {
        Self {
            devices,
            lookups: Cell::new(0),
        }
    }
}

impl DeviceFinder for FakeDeviceFinder {
    type Device = FakeYubiKey;

    fn find_all(&self) -> PinOnlyResult<Vec<Self::Device>> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.devices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::piv_contract;

    contract_tests_for!(
        fake_session_contract,
        make = || FakeYubiKey::factory(1234567).open_session().unwrap(),
        tests = {
            test_set_pin_protected_with_default_pin => piv_contract::test_set_pin_protected_with_default_pin,
            test_set_pin_protected_twice => piv_contract::test_set_pin_protected_twice,
            test_unsupported_modes_refused => piv_contract::test_unsupported_modes_refused,
            test_set_mode_without_collector => piv_contract::test_set_mode_without_collector,
            test_refusing_collector_aborts => piv_contract::test_refusing_collector_aborts,
        }
    );

    contract_tests_for!(
        fake_changed_pin_contract,
        make = || FakeYubiKey::new(1234567, Pin::from_str("654321").unwrap())
            .open_session()
            .unwrap(),
        tests = {
            test_changed_pin_refused => piv_contract::test_changed_pin_refused,
        }
    );

    contract_tests_for!(
        fake_finder_contract,
        make = || FakeDeviceFinder::new(vec![
            FakeYubiKey::factory(1111111),
            FakeYubiKey::factory(7654321),
        ]),
        tests = {
            test_find_by_serial_exact_match => piv_contract::test_find_by_serial_exact_match,
            test_find_by_serial_not_found => piv_contract::test_find_by_serial_not_found,
        }
    );

    #[test]
    fn test_wrong_pin_consumes_one_attempt() {
        let device = FakeYubiKey::new(1, Pin::from_str("654321").unwrap());
        let mut session = device.clone().open_session().unwrap();
        session.set_key_collector(Box::new(crate::logic::DefaultPinCollector));

        assert!(session.set_pin_only_mode(PinOnlyMode::PinProtected).is_err());
        assert_eq!(device.state().pin_attempts, 1);
        assert_eq!(device.state().pin_retries, PIN_ATTEMPTS - 1);
        assert_eq!(device.state().mode, PinOnlyMode::None);
    }

    #[test]
    fn test_session_drop_releases_device() {
        let device = FakeYubiKey::factory(1);
        let session = device.clone().open_session().unwrap();
        assert_eq!(device.state().open_sessions, 1);

        drop(session);
        assert_eq!(device.state().open_sessions, 0);
    }

    #[test]
    fn test_protected_key_replaces_default() {
        let device = FakeYubiKey::factory(1);
        let mut session = device.clone().open_session().unwrap();
        session.set_key_collector(Box::new(crate::logic::DefaultPinCollector));
        session.set_pin_only_mode(PinOnlyMode::PinProtected).unwrap();

        let state = device.state();
        assert!(!state.mgmt_key.is_default());
        assert_eq!(state.protected_mgmt_key.as_ref(), Some(&state.mgmt_key));
    }
}

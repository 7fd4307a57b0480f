use tracing::debug;

use super::PivDevice;
use crate::error::{DeviceError, PinOnlyResult};
use crate::model::SerialNumber;

/// Capability to enumerate attached PIV devices
pub trait DeviceFinder {
    type Device: PivDevice;

    /// Open every attached device
    fn find_all(&self) -> PinOnlyResult<Vec<Self::Device>>;

    /// Find the attached device whose serial matches exactly
    ///
    /// # Errors
    ///
    /// Returns `PinOnlyError::Device(DeviceError::NotFound)` if no device matches
    fn find_by_serial(&self, serial: &SerialNumber) -> PinOnlyResult<Self::Device> {
        let devices = self.find_all()?;
        debug!(count = devices.len(), "enumerated attached devices");

        devices
            .into_iter()
            .find(|device| &device.serial() == serial)
            .ok_or_else(|| {
                DeviceError::NotFound {
                    serial: serial.to_string(),
                }
                .into()
            })
    }
}

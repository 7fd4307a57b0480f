use crate::adapters::PivDeviceFinder;
use crate::error::PinOnlyResult;
use crate::use_cases::provision as provision_use_case;

pub use crate::model::*;

/// Put the attached YubiKey with this serial into PIN-protected mode
pub fn provision(serial: &str) -> PinOnlyResult<()> {
    let finder = PivDeviceFinder;
    provision_use_case(&finder, serial)
}

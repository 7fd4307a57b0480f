use std::fmt;

use yubikey::MgmType;

/// How the PIV management key relates to the PIN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinOnlyMode {
    /// Management key is entered separately
    None,
    /// Management key is stored on the device behind the PIN
    PinProtected,
    /// Management key is derived from the PIN (deprecated by Yubico)
    PinDerived,
}

impl PinOnlyMode {
    pub fn from_yubikey_mgm_type(mgm_type: MgmType) -> Self {
        match mgm_type {
            MgmType::Protected => PinOnlyMode::PinProtected,
            MgmType::Derived => PinOnlyMode::PinDerived,
            _ => PinOnlyMode::None,
        }
    }
}

impl fmt::Display for PinOnlyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinOnlyMode::None => "none",
            PinOnlyMode::PinProtected => "pin-protected",
            PinOnlyMode::PinDerived => "pin-derived",
        };
        f.write_str(name)
    }
}

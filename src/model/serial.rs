use std::fmt;
use thiserror::Error;

/// Serial number of a security key, in its decimal string form
///
/// Matching against attached devices is exact string equality, so
/// `"0123"` never matches a device reporting `123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber(String);

impl SerialNumber {
    pub fn new(serial: impl Into<String>) -> Result<Self, SerialError> {
        let serial = serial.into();
        if serial.trim().is_empty() {
            return Err(SerialError::Empty);
        }
        Ok(Self(serial))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for SerialNumber {
    fn from(serial: u32) -> Self {
        Self(serial.to_string())
    }
}

impl From<yubikey::Serial> for SerialNumber {
    fn from(serial: yubikey::Serial) -> Self {
        Self(serial.to_string())
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    #[error("serial number is empty")]
    Empty,
}

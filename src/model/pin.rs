use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// PIV PIN value
///
/// Holds 6 to 8 bytes. The bytes are wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(Zeroizing<Vec<u8>>);

impl Pin {
    /// Factory-default PIV PIN
    pub const DEFAULT: &'static [u8] = b"123456";

    pub const MIN_LENGTH: usize = 6;

    pub const MAX_LENGTH: usize = 8;

    pub fn new(pin: Vec<u8>) -> Result<Self, PinError> {
        if pin.len() < Self::MIN_LENGTH {
            return Err(PinError::TooShort);
        }
        if pin.len() > Self::MAX_LENGTH {
            return Err(PinError::TooLong);
        }
        Ok(Self(Zeroizing::new(pin)))
    }

    pub fn from_str(pin: &str) -> Result<Self, PinError> {
        Self::new(pin.as_bytes().to_vec())
    }

    pub fn default() -> Self {
        Self(Zeroizing::new(Self::DEFAULT.to_vec()))
    }

    pub fn is_default(&self) -> bool {
        self.as_bytes() == Self::DEFAULT
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin([REDACTED])")
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must be at least {min} characters", min = Pin::MIN_LENGTH)]
    TooShort,

    #[error("PIN must be at most {max} characters", max = Pin::MAX_LENGTH)]
    TooLong,
}

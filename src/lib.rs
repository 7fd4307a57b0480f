//! Provision a YubiKey PIV applet into PIN-protected pin-only mode
//!
//! The device is located by serial number and unlocked with the factory-default
//! PIN. A fresh management key is then stored on the device behind the PIN.
//! If the device rejects the default PIN the process stops immediately instead
//! of spending more PIN attempts.

mod adapters;
pub mod api;
pub mod error;
pub mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use error::{PinOnlyError, PinOnlyResult};

// Re-export public API
pub use api::provision;
pub use logic::DefaultPinCollector;
pub use adapters::{PivDeviceFinder, PivYubiKey, YubiKeyPivSession};

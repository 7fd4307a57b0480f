//! Ports (traits) for PIV provisioning
//!
//! These traits define the capabilities the provisioning use case needs.
//! They represent ports in hexagonal architecture - the core depends on
//! these abstractions, not on the yubikey crate.

mod device_finder;
mod key_collector;
mod piv_session;

pub use device_finder::DeviceFinder;
pub use key_collector::KeyCollector;
pub use piv_session::{PivDevice, PivSession};

mod key_entry;
mod mgmt_key;
mod pin;
mod pin_only_mode;
mod serial;

pub use key_entry::{KeyEntryData, KeyEntryRequest, Submission};
pub use mgmt_key::{ManagementKey, ManagementKeyError};
pub use pin::{Pin, PinError};
pub use pin_only_mode::PinOnlyMode;
pub use serial::{SerialError, SerialNumber};

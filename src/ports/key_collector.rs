//! KeyCollector trait - the credential source a PIV session asks for values

use crate::error::PinOnlyResult;
use crate::model::KeyEntryData;

/// Capability to answer credential requests from a PIV session
///
/// A session calls the collector synchronously, once per authentication step,
/// and once more with `KeyEntryRequest::Release` when the operation ends.
///
/// # Returns
///
/// * `Ok(true)` - the request was handled, the session continues
/// * `Ok(false)` - the request was not handled, the session aborts the attempt
///
/// # Errors
///
/// An error aborts the whole operation and reaches the caller unchanged.
pub trait KeyCollector {
    fn collect(&self, data: Option<KeyEntryData<'_>>) -> PinOnlyResult<bool>;
}

impl<F> KeyCollector for F
where
    F: for<'a> Fn(Option<KeyEntryData<'a>>) -> PinOnlyResult<bool>,
{
    fn collect(&self, data: Option<KeyEntryData<'_>>) -> PinOnlyResult<bool> {
        self(data)
    }
}

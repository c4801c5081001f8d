//! Dispatcher port.

use crate::dispatch::domain::{Arguments, DispatchResult};
use serde_json::Value;
use std::sync::Arc;

/// Invokes a named method with caller-supplied arguments.
///
/// The validating decorator implements this trait as well as consuming it,
/// so validators can be stacked.
#[cfg_attr(test, mockall::automock)]
pub trait Dispatcher: Send + Sync {
    /// Invokes `method` with `arguments`.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`](crate::dispatch::domain::DispatchError)
    /// describing why the call was not completed.
    fn invoke(&self, method: &str, arguments: &Arguments) -> DispatchResult<Value>;
}

impl<D> Dispatcher for Arc<D>
where
    D: Dispatcher + ?Sized,
{
    fn invoke(&self, method: &str, arguments: &Arguments) -> DispatchResult<Value> {
        (**self).invoke(method, arguments)
    }
}

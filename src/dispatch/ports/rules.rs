//! Rule registry port.

use crate::dispatch::domain::{ConfigurationError, HandlerId, Ruleset};

/// Supplies the declared ruleset for a handler.
#[cfg_attr(test, mockall::automock)]
pub trait RuleRegistry: Send + Sync {
    /// Returns the ruleset for `handler`, or `None` when the handler
    /// declares no validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the stored rule metadata is
    /// malformed.
    fn rules_for(&self, handler: &HandlerId) -> Result<Option<Ruleset>, ConfigurationError>;
}

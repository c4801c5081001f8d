//! Method resolver port.

use crate::dispatch::domain::{HandlerId, MethodName, MethodSignature, ResolutionError};

/// Handler reference and formal parameters for a method name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHandler {
    /// Identity of the handler behind the method.
    pub handler: HandlerId,
    /// Ordered formal parameters.
    pub signature: MethodSignature,
}

impl ResolvedHandler {
    /// Creates a resolved handler.
    #[must_use]
    pub const fn new(handler: HandlerId, signature: MethodSignature) -> Self {
        Self { handler, signature }
    }
}

/// Maps method names to handlers and their parameter lists.
#[cfg_attr(test, mockall::automock)]
pub trait MethodResolver: Send + Sync {
    /// Resolves a method name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnknownMethod`] when the name is not
    /// registered.
    fn resolve(&self, method: &MethodName) -> Result<ResolvedHandler, ResolutionError>;

    /// Lists every method the resolver knows, in a stable order.
    fn methods(&self) -> Vec<MethodName>;
}

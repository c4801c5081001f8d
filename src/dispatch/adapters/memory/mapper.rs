//! In-memory method mapper holding handler functions.

use crate::dispatch::{
    domain::{
        BoundArguments, ConfigurationError, HandlerError, HandlerId, MethodName, MethodSignature,
        ResolutionError,
    },
    ports::{MethodResolver, ResolvedHandler},
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Handler function invoked with the bound argument vector.
pub type HandlerFn = Arc<dyn Fn(&BoundArguments) -> Result<Value, HandlerError> + Send + Sync>;

/// A method name routed to a handler function.
#[derive(Clone)]
pub struct MethodRegistration {
    name: MethodName,
    handler: HandlerId,
    signature: MethodSignature,
    function: HandlerFn,
}

impl MethodRegistration {
    /// Creates a registration whose handler identity equals the method name.
    pub fn new<F>(name: MethodName, signature: MethodSignature, function: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        Self {
            handler: HandlerId::from(&name),
            name,
            signature,
            function: Arc::new(function),
        }
    }

    /// Routes the method to an explicit handler identity, so several names
    /// can share one ruleset.
    #[must_use]
    pub fn with_handler(mut self, handler: HandlerId) -> Self {
        self.handler = handler;
        self
    }

    /// Returns the method name.
    #[must_use]
    pub const fn name(&self) -> &MethodName {
        &self.name
    }

    /// Returns the handler identity.
    #[must_use]
    pub const fn handler(&self) -> &HandlerId {
        &self.handler
    }

    /// Returns the formal parameters.
    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Returns the handler function.
    #[must_use]
    pub fn function(&self) -> HandlerFn {
        Arc::clone(&self.function)
    }
}

impl fmt::Debug for MethodRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistration")
            .field("name", &self.name)
            .field("handler", &self.handler)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Method mapper backed by a map of registrations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMethodMapper {
    methods: BTreeMap<MethodName, MethodRegistration>,
}

impl InMemoryMethodMapper {
    /// Creates an empty mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapper from registrations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSignature`] when a method name is
    /// registered twice.
    pub fn with_methods(
        registrations: impl IntoIterator<Item = MethodRegistration>,
    ) -> Result<Self, ConfigurationError> {
        let mut methods = BTreeMap::new();
        for registration in registrations {
            let name = registration.name.clone();
            if methods.insert(name.clone(), registration).is_some() {
                return Err(ConfigurationError::invalid_signature(
                    name.as_str(),
                    "method registered twice",
                ));
            }
        }
        Ok(Self { methods })
    }

    /// Looks up a registration by method name.
    #[must_use]
    pub fn registration(&self, method: &MethodName) -> Option<&MethodRegistration> {
        self.methods.get(method)
    }
}

impl MethodResolver for InMemoryMethodMapper {
    fn resolve(&self, method: &MethodName) -> Result<ResolvedHandler, ResolutionError> {
        self.methods
            .get(method)
            .map(|registration| {
                ResolvedHandler::new(registration.handler.clone(), registration.signature.clone())
            })
            .ok_or_else(|| ResolutionError::UnknownMethod(method.to_string()))
    }

    fn methods(&self) -> Vec<MethodName> {
        self.methods.keys().cloned().collect()
    }
}

//! Plain dispatcher calling in-memory handlers.

use super::InMemoryMethodMapper;
use crate::dispatch::{
    domain::{Arguments, DispatchResult, MethodName, ResolutionError},
    ports::Dispatcher,
    services::bind,
};
use serde_json::Value;
use std::sync::Arc;

/// Dispatcher that binds arguments and calls the mapped handler, without
/// any constraint checks.
#[derive(Debug, Clone)]
pub struct SimpleDispatcher {
    mapper: Arc<InMemoryMethodMapper>,
}

impl SimpleDispatcher {
    /// Creates a dispatcher over `mapper`.
    #[must_use]
    pub const fn new(mapper: Arc<InMemoryMethodMapper>) -> Self {
        Self { mapper }
    }

    /// Returns the mapper this dispatcher routes through.
    #[must_use]
    pub fn mapper(&self) -> Arc<InMemoryMethodMapper> {
        Arc::clone(&self.mapper)
    }
}

impl Dispatcher for SimpleDispatcher {
    fn invoke(&self, method: &str, arguments: &Arguments) -> DispatchResult<Value> {
        let name = MethodName::new(method)?;
        let registration = self
            .mapper
            .registration(&name)
            .ok_or_else(|| ResolutionError::UnknownMethod(name.to_string()))?;

        let bound = bind(&name, registration.signature(), arguments)?;
        Ok((registration.function())(&bound)?)
    }
}

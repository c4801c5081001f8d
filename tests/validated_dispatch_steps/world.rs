//! Shared world state for validated dispatch BDD scenarios.

use crate::test_helpers::{ExampleDispatcher, example_dispatcher};
use paramguard::dispatch::{
    config::DispatcherConfig,
    domain::{Arguments, DispatchError, DispatchResult},
    ports::Dispatcher,
    vocabulary::ConstraintVocabulary,
};
use rstest::fixture;
use serde_json::Value;

/// Scenario world for validated dispatch behaviour tests.
#[derive(Default)]
pub struct DispatchWorld {
    pub vocabulary: ConstraintVocabulary,
    pub dispatcher: Option<ExampleDispatcher>,
    pub results: Vec<DispatchResult<Value>>,
}

impl DispatchWorld {
    /// Replaces the current dispatcher with one built from `config`.
    pub fn rebuild(&mut self, config: &DispatcherConfig) {
        self.dispatcher = Some(example_dispatcher(&self.vocabulary, config));
    }

    /// Invokes `method` and records the result.
    pub fn call(&mut self, method: &str, arguments: &Arguments) -> Result<(), eyre::Report> {
        let dispatcher = self
            .dispatcher
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing dispatcher in scenario world"))?;
        self.results.push(dispatcher.invoke(method, arguments));
        Ok(())
    }

    /// Returns the most recent call result.
    pub fn last_result(&self) -> Result<&DispatchResult<Value>, eyre::Report> {
        self.results
            .last()
            .ok_or_else(|| eyre::eyre!("no call recorded in scenario world"))
    }

    /// Returns the error of the most recent call.
    pub fn last_error(&self) -> Result<&DispatchError, eyre::Report> {
        match self.last_result()? {
            Ok(value) => Err(eyre::eyre!("expected the call to fail, it returned {value}")),
            Err(error) => Ok(error),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

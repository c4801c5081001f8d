//! Validating dispatcher decorator.

use crate::dispatch::{
    config::{DispatcherConfig, ViolationPolicy},
    domain::{Arguments, DispatchError, DispatchResult, InvocationId},
    ports::{ConstraintChecker, Dispatcher, MethodResolver, RuleRegistry},
    services::{
        binder::bind,
        orchestrator::validate,
        resolution::{ResolvedMethod, resolve_method},
    },
    vocabulary::ConstraintVocabulary,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, debug_span, error, warn};

/// Dispatcher that checks declared argument constraints before forwarding.
///
/// Each call is resolved, bound and validated. Only when validation passes
/// is the inner dispatcher invoked, with the original method name and the
/// original arguments; its result or error is returned unchanged. Any
/// resolution, configuration, binding or constraint failure is returned
/// without touching the inner dispatcher.
pub struct ValidatingDispatcher<D, M, R, C>
where
    D: Dispatcher,
    M: MethodResolver,
    R: RuleRegistry,
    C: ConstraintChecker,
{
    inner: Arc<D>,
    resolver: Arc<M>,
    rules: Arc<R>,
    checker: Arc<C>,
    vocabulary: ConstraintVocabulary,
    policy: ViolationPolicy,
    delegate_missing_arguments: bool,
}

impl<D, M, R, C> Clone for ValidatingDispatcher<D, M, R, C>
where
    D: Dispatcher,
    M: MethodResolver,
    R: RuleRegistry,
    C: ConstraintChecker,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            resolver: Arc::clone(&self.resolver),
            rules: Arc::clone(&self.rules),
            checker: Arc::clone(&self.checker),
            vocabulary: self.vocabulary.clone(),
            policy: self.policy,
            delegate_missing_arguments: self.delegate_missing_arguments,
        }
    }
}

impl<D, M, R, C> ValidatingDispatcher<D, M, R, C>
where
    D: Dispatcher,
    M: MethodResolver,
    R: RuleRegistry,
    C: ConstraintChecker,
{
    /// Creates a validating dispatcher and installs the configured
    /// namespaces into `vocabulary`.
    ///
    /// Installation only adds namespaces; namespaces contributed by other
    /// dispatchers sharing the vocabulary stay recognized.
    #[must_use]
    pub fn new(
        inner: Arc<D>,
        resolver: Arc<M>,
        rules: Arc<R>,
        checker: Arc<C>,
        vocabulary: &ConstraintVocabulary,
        config: &DispatcherConfig,
    ) -> Self {
        vocabulary.install(&config.vocabulary);
        Self {
            inner,
            resolver,
            rules,
            checker,
            vocabulary: vocabulary.clone(),
            policy: config.policy,
            delegate_missing_arguments: config.delegate_missing_arguments,
        }
    }

    /// Returns the vocabulary this dispatcher checks constraints against.
    #[must_use]
    pub const fn vocabulary(&self) -> &ConstraintVocabulary {
        &self.vocabulary
    }

    /// Returns the violation aggregation policy.
    #[must_use]
    pub const fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Resolves a method and verifies its declared rules.
    ///
    /// # Errors
    ///
    /// Returns resolution or configuration errors.
    pub fn resolve(&self, method: &str) -> DispatchResult<ResolvedMethod> {
        resolve_method(
            method,
            self.resolver.as_ref(),
            self.rules.as_ref(),
            &self.vocabulary,
            self.checker.as_ref(),
        )
    }

    /// Runs resolution, binding and constraint checks without forwarding.
    ///
    /// # Errors
    ///
    /// Returns the first resolution, configuration, binding or constraint
    /// failure.
    pub fn validate(&self, method: &str, arguments: &Arguments) -> DispatchResult<()> {
        let resolved = self.resolve(method)?;
        let bound = match bind(&resolved.method, &resolved.signature, arguments) {
            Ok(bound) => bound,
            Err(missing) if self.delegate_missing_arguments => {
                debug!(parameter = %missing.parameter, "delegating missing argument");
                return Ok(());
            }
            Err(missing) => return Err(missing.into()),
        };

        validate(
            &resolved.method,
            &resolved.signature,
            &bound,
            resolved.ruleset.as_ref(),
            self.checker.as_ref(),
            self.policy,
        )?;
        Ok(())
    }

    /// Resolves every listed method to surface rule defects up front.
    ///
    /// Returns the number of methods verified.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or configuration error encountered, in
    /// the resolver's listing order.
    pub fn preflight(&self) -> DispatchResult<usize> {
        let methods = self.resolver.methods();
        for method in &methods {
            self.resolve(method.as_str()).inspect_err(log_rejection)?;
        }
        debug!(methods = methods.len(), "preflight verified rules");
        Ok(methods.len())
    }
}

impl<D, M, R, C> Dispatcher for ValidatingDispatcher<D, M, R, C>
where
    D: Dispatcher,
    M: MethodResolver,
    R: RuleRegistry,
    C: ConstraintChecker,
{
    fn invoke(&self, method: &str, arguments: &Arguments) -> DispatchResult<Value> {
        let invocation = InvocationId::new();
        let span = debug_span!("validated_invoke", %invocation, method);
        let _entered = span.enter();

        self.validate(method, arguments)
            .inspect_err(log_rejection)?;

        debug!("arguments valid, forwarding");
        self.inner.invoke(method, arguments)
    }
}

fn log_rejection(error: &DispatchError) {
    match error {
        DispatchError::Configuration(defect) => {
            error!(error = %defect, "rejected: rule configuration defect");
        }
        DispatchError::Argument(argument) => {
            warn!(
                parameter = argument.parameter(),
                position = argument.position(),
                "rejected: invalid argument"
            );
        }
        other => warn!(error = %other, "rejected"),
    }
}

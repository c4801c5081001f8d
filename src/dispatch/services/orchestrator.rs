//! Per-parameter constraint evaluation.

use crate::dispatch::{
    config::ViolationPolicy,
    domain::{
        ArgumentError, BoundArguments, MethodName, MethodSignature, ParameterViolations, Ruleset,
    },
    ports::ConstraintChecker,
};
use serde_json::Value;
use tracing::trace;

/// Checks bound values against the declared ruleset.
///
/// Parameters are visited in position order and only those with a ruleset
/// entry reach the checker. Under [`ViolationPolicy::FailFast`] the first
/// invalid parameter ends evaluation; later parameters are never checked.
/// A missing ruleset means the method is unconstrained.
///
/// # Errors
///
/// Returns [`ArgumentError`] naming the lowest-position invalid parameter.
pub fn validate<C>(
    method: &MethodName,
    signature: &MethodSignature,
    bound: &BoundArguments,
    ruleset: Option<&Ruleset>,
    checker: &C,
    policy: ViolationPolicy,
) -> Result<(), ArgumentError>
where
    C: ConstraintChecker + ?Sized,
{
    let Some(rules) = ruleset else {
        return Ok(());
    };

    let mut failure: Option<ArgumentError> = None;

    for parameter in signature.parameters() {
        let Some(constraints) = rules.constraints_for(&parameter.name) else {
            continue;
        };

        let value = bound.get(parameter.position).unwrap_or(&Value::Null);
        trace!(
            parameter = %parameter.name,
            constraints = constraints.len(),
            "checking parameter"
        );
        let violations = checker.check(value, constraints);
        if violations.is_empty() {
            continue;
        }

        let record = ParameterViolations::new(&parameter.name, parameter.position, violations);
        failure = Some(match failure {
            None => ArgumentError::new(method.clone(), record),
            Some(existing) => existing.with_failure(record),
        });

        if policy == ViolationPolicy::FailFast {
            break;
        }
    }

    failure.map_or(Ok(()), Err)
}

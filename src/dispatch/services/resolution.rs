//! Method and rule resolution.

use crate::dispatch::{
    domain::{
        ConfigurationError, Constraint, DispatchResult, HandlerId, MethodName, MethodSignature,
        Ruleset,
    },
    ports::{ConstraintChecker, MethodResolver, ResolvedHandler, RuleRegistry},
    vocabulary::ConstraintVocabulary,
};

/// A method with its parameters and verified ruleset.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMethod {
    /// Canonical method name.
    pub method: MethodName,
    /// Handler behind the method.
    pub handler: HandlerId,
    /// Ordered formal parameters.
    pub signature: MethodSignature,
    /// Declared rules, or `None` when the method is unconstrained.
    pub ruleset: Option<Ruleset>,
}

/// Resolves `method` to its parameters and ruleset.
///
/// The ruleset is verified against the handler's parameters, the
/// recognized vocabulary and the checker before any argument is looked at.
///
/// # Errors
///
/// Returns [`ResolutionError`](crate::dispatch::domain::ResolutionError)
/// for unknown or malformed method names and [`ConfigurationError`] for
/// inconsistent rules.
pub fn resolve_method<M, R, C>(
    method: &str,
    resolver: &M,
    rules: &R,
    vocabulary: &ConstraintVocabulary,
    checker: &C,
) -> DispatchResult<ResolvedMethod>
where
    M: MethodResolver + ?Sized,
    R: RuleRegistry + ?Sized,
    C: ConstraintChecker + ?Sized,
{
    let name = MethodName::new(method)?;
    let ResolvedHandler { handler, signature } = resolver.resolve(&name)?;
    let ruleset = rules.rules_for(&handler)?;

    if let Some(declared) = ruleset.as_ref() {
        verify_ruleset(&handler, &signature, declared, vocabulary, checker)?;
    }

    Ok(ResolvedMethod {
        method: name,
        handler,
        signature,
        ruleset,
    })
}

/// Checks that every rule targets a declared parameter and that every
/// constraint, nested ones included, is recognized and can be evaluated.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownParameter`],
/// [`ConfigurationError::UnrecognizedConstraint`] or
/// [`ConfigurationError::InvalidConstraint`] for the first defect found in
/// parameter-name order.
pub fn verify_ruleset<C>(
    handler: &HandlerId,
    signature: &MethodSignature,
    ruleset: &Ruleset,
    vocabulary: &ConstraintVocabulary,
    checker: &C,
) -> Result<(), ConfigurationError>
where
    C: ConstraintChecker + ?Sized,
{
    for (parameter, constraints) in ruleset.iter() {
        if signature.parameter(parameter).is_none() {
            return Err(ConfigurationError::UnknownParameter {
                handler: handler.clone(),
                parameter: parameter.to_owned(),
            });
        }

        let site = RuleSite {
            handler,
            parameter,
            vocabulary,
        };
        site.verify(constraints, checker)?;
    }
    Ok(())
}

struct RuleSite<'a> {
    handler: &'a HandlerId,
    parameter: &'a str,
    vocabulary: &'a ConstraintVocabulary,
}

impl RuleSite<'_> {
    fn verify<C>(&self, constraints: &[Constraint], checker: &C) -> Result<(), ConfigurationError>
    where
        C: ConstraintChecker + ?Sized,
    {
        for constraint in constraints {
            if !self.vocabulary.is_recognized(&constraint.id) {
                return Err(ConfigurationError::UnrecognizedConstraint {
                    handler: self.handler.clone(),
                    parameter: self.parameter.to_owned(),
                    constraint: constraint.id.clone(),
                });
            }

            let nested = checker.verify(constraint).map_err(|defect| {
                ConfigurationError::InvalidConstraint {
                    handler: self.handler.clone(),
                    parameter: self.parameter.to_owned(),
                    constraint: constraint.id.clone(),
                    defect,
                }
            })?;
            self.verify(&nested, checker)?;
        }
        Ok(())
    }
}

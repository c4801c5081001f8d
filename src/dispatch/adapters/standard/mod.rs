//! Constraint checker for the standard and built-in vocabularies.
//!
//! Identifiers in the `assert` namespace map to the standard assertions
//! (`assert::Type`, `assert::NotEqualTo`, `assert::Regex`, ...). The
//! built-in namespace provides `paramguard::Each`, which applies nested
//! constraints to every element of a list. Further constraints are supplied
//! as predicates with [`StandardConstraintChecker::with_predicate`].
//!
//! Every constraint accepts a `message` option that replaces the default
//! violation message. Messages are `minijinja` templates; `value` and the
//! constraint-specific placeholders are available to them.
//!
//! [`ConstraintChecker::verify`] reports unknown constraints and malformed
//! options up front, so resolution can reject them before any value is
//! checked. Evaluation still turns them into violations when a caller skips
//! verification.

mod assertions;
mod messages;

use crate::dispatch::{
    domain::{
        BUILTIN_NAMESPACE, Constraint, ConstraintDefect, ConstraintId, STANDARD_NAMESPACE,
        Violation,
    },
    ports::ConstraintChecker,
};
use assertions::Outcome;
use minijinja::Environment;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const EACH: &str = "Each";
const MESSAGE_OPTION: &str = "message";

/// Custom predicate; returns `true` when the value satisfies the constraint.
pub type Predicate = Arc<dyn Fn(&Value, &Constraint) -> bool + Send + Sync>;

/// Checker for `assert::*` and `paramguard::*` constraints plus any
/// registered predicates.
///
/// Constraints the checker cannot evaluate produce a violation rather than
/// passing silently.
///
/// # Examples
///
/// ```
/// use paramguard::dispatch::adapters::StandardConstraintChecker;
/// use paramguard::dispatch::domain::Constraint;
/// use paramguard::dispatch::ports::ConstraintChecker;
/// use serde_json::json;
///
/// let checker = StandardConstraintChecker::new();
/// let non_zero = Constraint::parse("assert::NotEqualTo")
///     .expect("valid id")
///     .with_option("value", 0);
///
/// assert!(checker.check(&json!(4), &[non_zero.clone()]).is_empty());
/// assert_eq!(checker.check(&json!("0"), &[non_zero]).len(), 1);
/// ```
#[derive(Clone)]
pub struct StandardConstraintChecker {
    predicates: HashMap<ConstraintId, Predicate>,
    templates: Environment<'static>,
}

impl StandardConstraintChecker {
    /// Creates a checker with no custom predicates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
            templates: Environment::new(),
        }
    }

    /// Registers a predicate for `id`. Registered predicates take
    /// precedence over the standard assertions.
    #[must_use]
    pub fn with_predicate<F>(mut self, id: ConstraintId, predicate: F) -> Self
    where
        F: Fn(&Value, &Constraint) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(id, Arc::new(predicate));
        self
    }

    fn check_one(&self, value: &Value, constraint: &Constraint) -> Option<Violation> {
        let outcome = self.predicates.get(&constraint.id).map_or_else(
            || self.evaluate(value, constraint),
            |predicate| {
                if predicate(value, constraint) {
                    Outcome::Valid
                } else {
                    invalid(messages::PREDICATE_FAILED)
                }
            },
        );

        match outcome {
            Outcome::Valid => None,
            Outcome::Invalid { template, context } => {
                Some(self.violation(constraint, value, template, context))
            }
            Outcome::Misconfigured(reason) => {
                let context = json!({ "constraint": constraint.id.as_str(), "reason": reason });
                Some(Violation::new(
                    constraint.id.clone(),
                    messages::render(&self.templates, messages::MISCONFIGURED, &as_map(context)),
                ))
            }
        }
    }

    fn evaluate(&self, value: &Value, constraint: &Constraint) -> Outcome {
        let id = &constraint.id;
        let evaluated = match id.namespace() {
            STANDARD_NAMESPACE => assertions::evaluate(id.name(), value, constraint),
            BUILTIN_NAMESPACE if id.name() == EACH => Some(self.each(value, constraint)),
            _ => None,
        };
        evaluated.unwrap_or_else(|| Outcome::Invalid {
            template: messages::UNSUPPORTED,
            context: as_map(json!({ "constraint": id.as_str() })),
        })
    }

    fn each(&self, value: &Value, constraint: &Constraint) -> Outcome {
        let nested = match nested_constraints(constraint) {
            Ok(nested) => nested,
            Err(reason) => return Outcome::Misconfigured(reason),
        };

        let items = match value {
            Value::Null => return Outcome::Valid,
            Value::Array(items) => items,
            _ => return invalid(messages::NOT_LIST),
        };

        for (index, item) in items.iter().enumerate() {
            if let Some(first) = self.check(item, &nested).into_iter().next() {
                return Outcome::Invalid {
                    template: messages::ELEMENT,
                    context: as_map(json!({ "index": index, "message": first.message })),
                };
            }
        }
        Outcome::Valid
    }

    fn violation(
        &self,
        constraint: &Constraint,
        value: &Value,
        template: &str,
        mut context: Map<String, Value>,
    ) -> Violation {
        context.insert("value".to_owned(), value.clone());
        let chosen = constraint
            .option(MESSAGE_OPTION)
            .and_then(Value::as_str)
            .unwrap_or(template);
        Violation::new(
            constraint.id.clone(),
            messages::render(&self.templates, chosen, &context),
        )
    }
}

impl Default for StandardConstraintChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintChecker for StandardConstraintChecker {
    fn check(&self, value: &Value, constraints: &[Constraint]) -> Vec<Violation> {
        constraints
            .iter()
            .filter_map(|constraint| self.check_one(value, constraint))
            .collect()
    }

    fn verify(&self, constraint: &Constraint) -> Result<Vec<Constraint>, ConstraintDefect> {
        let id = &constraint.id;
        if self.predicates.contains_key(id) {
            return Ok(Vec::new());
        }
        match id.namespace() {
            STANDARD_NAMESPACE => match assertions::verify(id.name(), constraint) {
                Some(Ok(())) => Ok(Vec::new()),
                Some(Err(reason)) => Err(ConstraintDefect::Misconfigured(reason)),
                None => Err(ConstraintDefect::Unsupported),
            },
            BUILTIN_NAMESPACE if id.name() == EACH => {
                nested_constraints(constraint).map_err(ConstraintDefect::Misconfigured)
            }
            _ => Err(ConstraintDefect::Unsupported),
        }
    }
}

impl fmt::Debug for StandardConstraintChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.predicates.keys().map(ConstraintId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("StandardConstraintChecker")
            .field("predicates", &ids)
            .finish()
    }
}

fn invalid(template: &'static str) -> Outcome {
    Outcome::Invalid {
        template,
        context: Map::new(),
    }
}

fn nested_constraints(constraint: &Constraint) -> Result<Vec<Constraint>, String> {
    let raw = constraint
        .option("constraints")
        .ok_or_else(|| "option 'constraints' is required".to_owned())?;
    serde_json::from_value(raw.clone())
        .map_err(|error| format!("option 'constraints' is invalid: {error}"))
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

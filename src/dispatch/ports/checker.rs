//! Constraint checker port.

use crate::dispatch::domain::{Constraint, ConstraintDefect, Violation};
use serde_json::Value;

/// Evaluates a value against a list of constraints.
///
/// Implementations must not have side effects observable by the caller;
/// the orchestrator may skip calls entirely once a parameter fails.
#[cfg_attr(test, mockall::automock)]
pub trait ConstraintChecker: Send + Sync {
    /// Returns the violated constraints, in declaration order. An empty
    /// vector means the value is valid.
    fn check(&self, value: &Value, constraints: &[Constraint]) -> Vec<Violation>;

    /// Confirms that `constraint` can be evaluated without looking at any
    /// value.
    ///
    /// Returns the constraints nested in its options, which callers verify
    /// in turn; most constraints nest none.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintDefect`] when nothing evaluates the constraint or
    /// its options are missing or invalid.
    fn verify(&self, constraint: &Constraint) -> Result<Vec<Constraint>, ConstraintDefect>;
}

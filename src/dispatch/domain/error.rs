//! Error taxonomy for validated dispatch.
//!
//! Each failure kind has its own type so callers and transports can tell a
//! caller mistake (bad or missing arguments) apart from a deployment defect
//! (inconsistent rule metadata) or an unknown method.

use super::{ConstraintId, HandlerId, MethodName, Violation};
use serde_json::Value;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Any failure surfaced by a dispatcher.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    /// The method name is unknown.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// Declared rule metadata is inconsistent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A required argument was not supplied.
    #[error(transparent)]
    MissingArgument(#[from] MissingArgumentError),
    /// A supplied value violates its declared constraints.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// The handler itself failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// Returns `true` when the failure stems from caller input rather than
    /// from configuration or the handler.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::MissingArgument(_) | Self::Argument(_))
    }
}

/// Errors raised while resolving a method name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The resolver does not know this method.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// The method name is blank or malformed.
    #[error("invalid method name '{0}'")]
    InvalidMethodName(String),
}

/// Errors describing malformed or inconsistent rule metadata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A ruleset names a parameter the handler does not declare.
    #[error("ruleset for handler '{handler}' references unknown parameter '{parameter}'")]
    UnknownParameter {
        /// Handler owning the ruleset.
        handler: HandlerId,
        /// Parameter named by the ruleset.
        parameter: String,
    },

    /// A ruleset references a constraint outside the recognized namespaces.
    #[error(
        "constraint '{constraint}' on parameter '{parameter}' of handler '{handler}' is not in a recognized namespace"
    )]
    UnrecognizedConstraint {
        /// Handler owning the ruleset.
        handler: HandlerId,
        /// Parameter the constraint is declared on.
        parameter: String,
        /// The unrecognized identifier.
        constraint: ConstraintId,
    },

    /// A recognized constraint cannot be evaluated.
    #[error(
        "constraint '{constraint}' on parameter '{parameter}' of handler '{handler}' cannot be evaluated: {defect}"
    )]
    InvalidConstraint {
        /// Handler owning the ruleset.
        handler: HandlerId,
        /// Parameter the constraint is declared on.
        parameter: String,
        /// The offending identifier.
        constraint: ConstraintId,
        /// What prevents evaluation.
        #[source]
        defect: ConstraintDefect,
    },

    /// A constraint identifier is malformed.
    #[error("invalid constraint identifier '{0}'")]
    InvalidConstraintId(String),

    /// A constraint namespace is malformed.
    #[error("invalid constraint namespace '{0}'")]
    InvalidNamespace(String),

    /// A parameter list breaks the signature invariants.
    #[error("invalid signature at parameter '{parameter}': {reason}")]
    InvalidSignature {
        /// Offending parameter.
        parameter: String,
        /// Description of the defect.
        reason: String,
    },

    /// Two rulesets were registered for one handler.
    #[error("duplicate ruleset for handler '{0}'")]
    DuplicateRuleset(HandlerId),

    /// A rule document could not be parsed.
    #[error("malformed rules in '{source_name}': {reason}")]
    MalformedRules {
        /// File or label the rules were read from.
        source_name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A rule file could not be read.
    #[error("cannot read rule file '{path}': {reason}")]
    RuleFileUnavailable {
        /// Path of the file.
        path: String,
        /// I/O diagnostic.
        reason: String,
    },
}

impl ConfigurationError {
    /// Creates an invalid signature error.
    #[must_use]
    pub fn invalid_signature(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed rules error.
    #[must_use]
    pub fn malformed_rules(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRules {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why a constraint cannot be evaluated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstraintDefect {
    /// No checker evaluates the constraint.
    #[error("no checker is registered for it")]
    Unsupported,
    /// The constraint's options are missing or invalid.
    #[error("{0}")]
    Misconfigured(String),
}

/// A required parameter has neither a supplied value nor a default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required argument '{parameter}' (position {position}) for method '{method}'")]
pub struct MissingArgumentError {
    /// Method being invoked.
    pub method: MethodName,
    /// Name of the missing parameter.
    pub parameter: String,
    /// Position of the missing parameter.
    pub position: usize,
}

/// Violations recorded against one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterViolations {
    /// Parameter name.
    pub parameter: String,
    /// Parameter position.
    pub position: usize,
    /// Violated constraints, in declaration order.
    pub violations: Vec<Violation>,
}

impl ParameterViolations {
    /// Creates a record of violations for one parameter.
    #[must_use]
    pub fn new(parameter: impl Into<String>, position: usize, violations: Vec<Violation>) -> Self {
        Self {
            parameter: parameter.into(),
            position,
            violations,
        }
    }
}

/// Supplied values violate declared constraints.
///
/// The primary failure is always the lowest-position invalid parameter.
/// Further failures are only recorded when every constrained parameter is
/// checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid argument '{}' for method '{}'", .primary.parameter, .method)]
pub struct ArgumentError {
    method: MethodName,
    primary: ParameterViolations,
    further: Vec<ParameterViolations>,
}

impl ArgumentError {
    /// Creates an argument error for the first failing parameter.
    #[must_use]
    pub const fn new(method: MethodName, primary: ParameterViolations) -> Self {
        Self {
            method,
            primary,
            further: Vec::new(),
        }
    }

    /// Records an additional failing parameter.
    #[must_use]
    pub fn with_failure(mut self, failure: ParameterViolations) -> Self {
        self.further.push(failure);
        self
    }

    /// Method whose arguments were rejected.
    #[must_use]
    pub const fn method(&self) -> &MethodName {
        &self.method
    }

    /// Name of the first failing parameter.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.primary.parameter
    }

    /// Position of the first failing parameter.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.primary.position
    }

    /// Violations of the first failing parameter.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.primary.violations
    }

    /// All failing parameters, primary first.
    pub fn failures(&self) -> impl Iterator<Item = &ParameterViolations> {
        std::iter::once(&self.primary).chain(self.further.iter())
    }
}

/// Failure raised by a handler, carrying its own fault code.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HandlerError {
    /// Fault code reported to the transport.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional structured detail.
    pub data: Option<Value>,
}

impl HandlerError {
    /// Generic server error code used when a handler does not pick one.
    pub const SERVER_ERROR: i64 = -32_000;

    /// Creates a handler error with the generic server error code.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: Self::SERVER_ERROR,
            message: message.into(),
            data: None,
        }
    }

    /// Overrides the fault code.
    #[must_use]
    pub const fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Attaches structured detail.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

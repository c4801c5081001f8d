//! Constraint identifiers, rulesets, and violations.
//!
//! A [`Constraint`] is opaque to the dispatch core: only its identifier is
//! read, to decide whether the constraint comes from a recognized
//! vocabulary. Its options are interpreted by a
//! [`ConstraintChecker`](crate::dispatch::ports::ConstraintChecker).

use super::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Namespace of the constraints shipped with this crate.
pub const BUILTIN_NAMESPACE: &str = "paramguard";

/// Namespace of the standard assertion vocabulary.
pub const STANDARD_NAMESPACE: &str = "assert";

const SEPARATOR: &str = "::";

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_valid_path(path: &str) -> bool {
    path.split(SEPARATOR).all(is_valid_segment)
}

/// A `::`-separated namespace that constraint identifiers may live under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConstraintNamespace(String);

impl ConstraintNamespace {
    /// Creates a validated namespace such as `acme::rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidNamespace`] when any segment is
    /// empty or contains characters outside `[A-Za-z0-9_]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let raw = value.into();
        if !is_valid_path(raw.trim()) {
            return Err(ConfigurationError::InvalidNamespace(raw));
        }
        Ok(Self(raw.trim().to_owned()))
    }

    /// The namespace of the constraints shipped with this crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self(BUILTIN_NAMESPACE.to_owned())
    }

    /// The namespace of the standard assertion vocabulary.
    #[must_use]
    pub fn standard() -> Self {
        Self(STANDARD_NAMESPACE.to_owned())
    }

    /// Returns the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `id` lives in this namespace or beneath it.
    ///
    /// Matching respects segment boundaries: `acme` contains
    /// `acme::rules::Positive` but not `acmecorp::Positive`.
    #[must_use]
    pub fn contains(&self, id: &ConstraintId) -> bool {
        id.namespace()
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
    }
}

impl TryFrom<String> for ConstraintNamespace {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConstraintNamespace> for String {
    fn from(value: ConstraintNamespace) -> Self {
        value.0
    }
}

impl fmt::Display for ConstraintNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified constraint identifier, for example `assert::Type`.
///
/// The final segment is the constraint name; everything before it is the
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConstraintId(String);

impl ConstraintId {
    /// Creates a validated constraint identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidConstraintId`] when the value has
    /// no namespace or contains an invalid segment.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !trimmed.contains(SEPARATOR) || !is_valid_path(trimmed) {
            return Err(ConfigurationError::InvalidConstraintId(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the namespace part of the identifier.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0
            .rsplit_once(SEPARATOR)
            .map_or("", |(namespace, _)| namespace)
    }

    /// Returns the constraint name, the final path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0
            .rsplit_once(SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Returns the full identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConstraintId {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConstraintId> for String {
    fn from(value: ConstraintId) -> Self {
        value.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single declared constraint: an identifier plus checker-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Identifier selecting the predicate.
    pub id: ConstraintId,
    /// Options passed through to the checker.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl Constraint {
    /// Creates a constraint without options.
    #[must_use]
    pub fn new(id: ConstraintId) -> Self {
        Self {
            id,
            options: Map::new(),
        }
    }

    /// Parses the identifier and creates a constraint without options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidConstraintId`] when `id` is not a
    /// valid identifier.
    pub fn parse(id: &str) -> Result<Self, ConfigurationError> {
        ConstraintId::new(id).map(Self::new)
    }

    /// Adds or replaces an option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns an option value by key.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// Per-method mapping from parameter name to its ordered constraints.
///
/// Parameters without an entry are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ruleset {
    rules: BTreeMap<String, Vec<Constraint>>,
}

impl Ruleset {
    /// Creates an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends constraints for a parameter.
    #[must_use]
    pub fn with_rule(
        mut self,
        parameter: impl Into<String>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.rules
            .entry(parameter.into())
            .or_default()
            .extend(constraints);
        self
    }

    /// Returns the constraints declared for a parameter, if any.
    #[must_use]
    pub fn constraints_for(&self, parameter: &str) -> Option<&[Constraint]> {
        self.rules.get(parameter).map(Vec::as_slice)
    }

    /// Iterates over constrained parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Constraint])> {
        self.rules
            .iter()
            .map(|(name, constraints)| (name.as_str(), constraints.as_slice()))
    }

    /// Returns `true` when no parameter is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A failed constraint for one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Constraint that rejected the value.
    pub constraint: ConstraintId,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub fn new(constraint: ConstraintId, message: impl Into<String>) -> Self {
        Self {
            constraint,
            message: message.into(),
        }
    }
}

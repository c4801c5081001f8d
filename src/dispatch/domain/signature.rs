//! Formal parameter lists for resolved handlers.

use super::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One formal parameter of a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name, matched exactly against named arguments.
    pub name: String,
    /// Zero-based index into the bound argument vector.
    pub position: usize,
    /// Value used when the caller omits the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    /// Creates a parameter without a default.
    #[must_use]
    pub fn required(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            default: None,
        }
    }

    /// Creates a parameter with a default value.
    #[must_use]
    pub fn optional(name: impl Into<String>, position: usize, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            position,
            default: Some(default.into()),
        }
    }

    /// Returns `true` when the parameter declares a default.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered formal parameter list of a handler.
///
/// Positions are unique and contiguous from zero, and names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodSignature {
    parameters: Vec<ParameterDescriptor>,
}

impl MethodSignature {
    /// Creates a signature from descriptors in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSignature`] when positions are not
    /// unique and contiguous from zero, or when a name repeats.
    pub fn new(
        parameters: impl IntoIterator<Item = ParameterDescriptor>,
    ) -> Result<Self, ConfigurationError> {
        let mut ordered: Vec<ParameterDescriptor> = parameters.into_iter().collect();
        ordered.sort_by_key(|parameter| parameter.position);

        let mut names = HashSet::new();
        for (expected, parameter) in ordered.iter().enumerate() {
            if parameter.position != expected {
                return Err(ConfigurationError::invalid_signature(
                    &parameter.name,
                    format!(
                        "position {} breaks the contiguous sequence at {expected}",
                        parameter.position
                    ),
                ));
            }
            if !names.insert(parameter.name.as_str()) {
                return Err(ConfigurationError::invalid_signature(
                    &parameter.name,
                    "duplicate parameter name",
                ));
            }
        }

        Ok(Self {
            parameters: ordered,
        })
    }

    /// Starts a builder that assigns positions in declaration order.
    #[must_use]
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Returns the parameters in position order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Looks up a parameter by exact name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` for a parameterless handler.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Builder for [`MethodSignature`].
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    parameters: Vec<ParameterDescriptor>,
}

impl SignatureBuilder {
    /// Appends a parameter without a default.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        let position = self.parameters.len();
        self.parameters
            .push(ParameterDescriptor::required(name, position));
        self
    }

    /// Appends a parameter with a default.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let position = self.parameters.len();
        self.parameters
            .push(ParameterDescriptor::optional(name, position, default));
        self
    }

    /// Builds the signature.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSignature`] when a name repeats.
    pub fn build(self) -> Result<MethodSignature, ConfigurationError> {
        MethodSignature::new(self.parameters)
    }
}

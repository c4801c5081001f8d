//! Caller-supplied and bound argument vectors.

use super::ParameterDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Arguments as supplied by the caller.
///
/// Deserializes from the JSON-RPC `params` shape: an array becomes
/// [`Arguments::Positional`], an object becomes [`Arguments::Named`] and
/// `null` becomes an empty positional list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arguments {
    /// Values matched to parameters by index.
    Positional(Vec<Value>),
    /// Values matched to parameters by exact name.
    Named(Map<String, Value>),
}

impl Arguments {
    /// Creates positional arguments.
    #[must_use]
    pub fn positional(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Creates named arguments.
    #[must_use]
    pub fn named(
        values: impl IntoIterator<Item = (impl Into<String>, impl Into<Value>)>,
    ) -> Self {
        Self::Named(
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the value the caller supplied for `parameter`, if any.
    #[must_use]
    pub fn supplied(&self, parameter: &ParameterDescriptor) -> Option<&Value> {
        match self {
            Self::Positional(values) => values.get(parameter.position),
            Self::Named(values) => values.get(&parameter.name),
        }
    }

    /// Returns the number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(values) => values.len(),
        }
    }

    /// Returns `true` when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Params {
    Positional(Vec<Value>),
    Named(Map<String, Value>),
}

impl<'de> Deserialize<'de> for Arguments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let arguments = match Option::<Params>::deserialize(deserializer)? {
            Some(Params::Positional(values)) => Self::Positional(values),
            Some(Params::Named(values)) => Self::Named(values),
            None => Self::default(),
        };
        Ok(arguments)
    }
}

/// Complete argument vector in parameter-position order.
///
/// Every slot holds either the supplied value or the parameter default.
/// Instances are produced by [`crate::dispatch::services::bind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: Vec<Value>,
}

impl BoundArguments {
    pub(crate) const fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns the value bound at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Returns all bound values in position order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Returns the number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a parameterless binding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the binding and returns its values.
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.values
    }
}

//! In-memory rule registry.

use crate::dispatch::{
    domain::{ConfigurationError, HandlerId, Ruleset},
    ports::RuleRegistry,
};
use serde::{Deserialize, Deserializer, de};
use std::collections::HashMap;
use std::fmt;

/// Rule registry populated at startup by registration calls or rule
/// documents.
///
/// A rule document is a JSON object mapping handler identity to a
/// [`Ruleset`]:
///
/// ```
/// use paramguard::dispatch::adapters::memory::InMemoryRuleRegistry;
/// use paramguard::dispatch::domain::HandlerId;
/// use paramguard::dispatch::ports::RuleRegistry;
///
/// let registry = InMemoryRuleRegistry::from_json("inline", r#"{
///     "math/divide": {
///         "a": [{ "id": "assert::Type", "options": { "type": "integer" } }],
///         "b": [
///             { "id": "assert::Type", "options": { "type": "integer" } },
///             { "id": "assert::NotEqualTo", "options": { "value": 0 } }
///         ]
///     }
/// }"#).expect("rules should parse");
///
/// let rules = registry
///     .rules_for(&HandlerId::new("math/divide"))
///     .expect("lookup succeeds")
///     .expect("divide is constrained");
/// assert_eq!(rules.constraints_for("b").map(<[_]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleRegistry {
    rulesets: HashMap<HandlerId, Ruleset>,
}

impl InMemoryRuleRegistry {
    /// Creates an empty registry; every handler is unconstrained.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a ruleset for a handler.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateRuleset`] when the handler
    /// already has one.
    pub fn with_ruleset(
        mut self,
        handler: HandlerId,
        ruleset: Ruleset,
    ) -> Result<Self, ConfigurationError> {
        if self.rulesets.contains_key(&handler) {
            return Err(ConfigurationError::DuplicateRuleset(handler));
        }
        self.rulesets.insert(handler, ruleset);
        Ok(self)
    }

    /// Parses a rule document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MalformedRules`] when the document is
    /// not a valid rule document, and
    /// [`ConfigurationError::DuplicateRuleset`] when it names a handler
    /// twice.
    pub fn from_json(source_name: &str, document: &str) -> Result<Self, ConfigurationError> {
        let RuleEntries(entries) = serde_json::from_str(document)
            .map_err(|error| ConfigurationError::malformed_rules(source_name, error))?;
        entries
            .into_iter()
            .try_fold(Self::new(), |registry, (handler, ruleset)| {
                registry.with_ruleset(handler, ruleset)
            })
    }

    /// Merges another registry into this one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateRuleset`] when both registries
    /// declare rules for the same handler.
    pub fn merge(self, other: Self) -> Result<Self, ConfigurationError> {
        other
            .rulesets
            .into_iter()
            .try_fold(self, |registry, (handler, ruleset)| {
                registry.with_ruleset(handler, ruleset)
            })
    }

    /// Returns the number of handlers with rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    /// Returns `true` when no handler has rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }
}

impl RuleRegistry for InMemoryRuleRegistry {
    fn rules_for(&self, handler: &HandlerId) -> Result<Option<Ruleset>, ConfigurationError> {
        Ok(self.rulesets.get(handler).cloned())
    }
}

/// Entries of one rule document in document order, repeated handlers kept.
struct RuleEntries(Vec<(HandlerId, Ruleset)>);

struct RuleEntriesVisitor;

impl<'de> de::Visitor<'de> for RuleEntriesVisitor {
    type Value = RuleEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from handler to ruleset")
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<HandlerId, Ruleset>()? {
            entries.push(entry);
        }
        Ok(RuleEntries(entries))
    }
}

impl<'de> Deserialize<'de> for RuleEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RuleEntriesVisitor)
    }
}

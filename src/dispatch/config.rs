//! Configuration for validating dispatchers.

use crate::dispatch::domain::ConstraintNamespace;

/// How many constrained parameters are checked once one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Stop at the lowest-position invalid parameter.
    #[default]
    FailFast,
    /// Check every constrained parameter and report all failures. The
    /// primary failure is still the lowest-position one.
    CollectAll,
}

/// Namespaces a dispatcher installs into the shared vocabulary.
///
/// # Examples
///
/// ```
/// use paramguard::dispatch::config::VocabularyConfig;
/// use paramguard::dispatch::domain::ConstraintNamespace;
///
/// let defaults = VocabularyConfig::default().namespaces();
/// assert!(defaults.contains(&ConstraintNamespace::standard()));
///
/// let acme = ConstraintNamespace::new("acme").expect("valid namespace");
/// let custom = VocabularyConfig::with_namespaces([acme.clone()]).namespaces();
/// assert_eq!(custom, vec![acme]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyConfig {
    namespaces: Option<Vec<ConstraintNamespace>>,
}

impl VocabularyConfig {
    /// Installs exactly the given namespaces instead of the defaults.
    #[must_use]
    pub fn with_namespaces(namespaces: impl IntoIterator<Item = ConstraintNamespace>) -> Self {
        Self {
            namespaces: Some(namespaces.into_iter().collect()),
        }
    }

    /// Returns the namespaces this configuration installs.
    ///
    /// Without an explicit list, these are the built-in and standard
    /// namespaces.
    #[must_use]
    pub fn namespaces(&self) -> Vec<ConstraintNamespace> {
        self.namespaces.clone().unwrap_or_else(|| {
            vec![
                ConstraintNamespace::standard(),
                ConstraintNamespace::builtin(),
            ]
        })
    }

    /// Returns `true` when an explicit namespace list replaces the defaults.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.namespaces.is_some()
    }
}

/// Configuration for a [`ValidatingDispatcher`](crate::dispatch::services::ValidatingDispatcher).
///
/// # Examples
///
/// ```
/// use paramguard::dispatch::config::{DispatcherConfig, ViolationPolicy};
///
/// let config = DispatcherConfig::default();
/// assert_eq!(config.policy, ViolationPolicy::FailFast);
/// assert!(!config.delegate_missing_arguments);
///
/// let diagnostic = DispatcherConfig::collect_all();
/// assert_eq!(diagnostic.policy, ViolationPolicy::CollectAll);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Namespaces installed into the vocabulary at construction.
    pub vocabulary: VocabularyConfig,
    /// Aggregation policy for constraint violations.
    pub policy: ViolationPolicy,
    /// When set, a missing required argument skips validation and the call
    /// is forwarded so the inner dispatcher reports it in its own terms.
    pub delegate_missing_arguments: bool,
}

impl DispatcherConfig {
    /// Default configuration with every constrained parameter checked.
    #[must_use]
    pub fn collect_all() -> Self {
        Self {
            policy: ViolationPolicy::CollectAll,
            ..Self::default()
        }
    }

    /// Default configuration installing only the given namespaces.
    #[must_use]
    pub fn with_namespaces(namespaces: impl IntoIterator<Item = ConstraintNamespace>) -> Self {
        Self {
            vocabulary: VocabularyConfig::with_namespaces(namespaces),
            ..Self::default()
        }
    }
}

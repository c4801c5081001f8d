//! Shared allow-list of recognized constraint namespaces.
//!
//! The vocabulary is additive: dispatchers constructed against the same
//! handle each contribute namespaces, and nothing ever removes one. Writers
//! serialize on a lock; readers take a consistent snapshot.

use crate::dispatch::{
    config::VocabularyConfig,
    domain::{ConstraintId, ConstraintNamespace},
};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::info;

static SHARED: OnceLock<ConstraintVocabulary> = OnceLock::new();

/// Thread-safe, cheaply cloneable set of recognized namespaces.
///
/// Clones share one underlying set.
///
/// # Examples
///
/// ```
/// use paramguard::dispatch::domain::{ConstraintId, ConstraintNamespace};
/// use paramguard::dispatch::vocabulary::ConstraintVocabulary;
///
/// let vocabulary = ConstraintVocabulary::new();
/// let id = ConstraintId::new("acme::Positive").expect("valid id");
/// assert!(!vocabulary.is_recognized(&id));
///
/// let other_handle = vocabulary.clone();
/// other_handle.extend([ConstraintNamespace::new("acme").expect("valid namespace")]);
/// assert!(vocabulary.is_recognized(&id));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintVocabulary {
    namespaces: Arc<RwLock<BTreeSet<ConstraintNamespace>>>,
}

impl ConstraintVocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide vocabulary, creating it on first use.
    #[must_use]
    pub fn shared() -> Self {
        SHARED.get_or_init(Self::new).clone()
    }

    /// Adds the namespaces selected by `config`. Returns how many were new.
    pub fn install(&self, config: &VocabularyConfig) -> usize {
        self.extend(config.namespaces())
    }

    /// Adds namespaces. Returns how many were new.
    pub fn extend(&self, namespaces: impl IntoIterator<Item = ConstraintNamespace>) -> usize {
        // Entries are only ever inserted, so a poisoned set is still valid.
        let mut guard = self
            .namespaces
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut added = 0;
        for namespace in namespaces {
            let label = namespace.to_string();
            if guard.insert(namespace) {
                info!(namespace = %label, "recognizing constraint namespace");
                added += 1;
            }
        }
        added
    }

    /// Returns `true` when some recognized namespace contains `id`.
    #[must_use]
    pub fn is_recognized(&self, id: &ConstraintId) -> bool {
        self.namespaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|namespace| namespace.contains(id))
    }

    /// Returns the recognized namespaces in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ConstraintNamespace> {
        self.namespaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

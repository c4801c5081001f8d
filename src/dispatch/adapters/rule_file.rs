//! Loading rule documents from a capability-scoped directory.

use super::memory::InMemoryRuleRegistry;
use crate::dispatch::domain::ConfigurationError;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use tracing::debug;

const RULE_FILE_EXTENSION: &str = "json";

/// Reads rule documents from one directory.
///
/// Access is limited to the opened directory; paths are resolved relative
/// to it and cannot escape it.
#[derive(Debug)]
pub struct RuleFileLoader {
    dir: Dir,
    root: Utf8PathBuf,
}

impl RuleFileLoader {
    /// Opens `root` with ambient authority.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::RuleFileUnavailable`] when the directory
    /// cannot be opened.
    pub fn open_ambient(root: &Utf8Path) -> Result<Self, ConfigurationError> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|error| unavailable(root, &error))?;
        Ok(Self::from_dir(dir, root))
    }

    /// Wraps an already opened directory. `root` is used in diagnostics.
    #[must_use]
    pub fn from_dir(dir: Dir, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir,
            root: root.into(),
        }
    }

    /// Loads one rule document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::RuleFileUnavailable`] when the file
    /// cannot be read and [`ConfigurationError::MalformedRules`] when it does
    /// not parse.
    pub fn load(&self, file: &Utf8Path) -> Result<InMemoryRuleRegistry, ConfigurationError> {
        let path = self.root.join(file);
        let document = self
            .dir
            .read_to_string(file)
            .map_err(|error| unavailable(&path, &error))?;
        let registry = InMemoryRuleRegistry::from_json(path.as_str(), &document)?;
        debug!(path = %path, handlers = registry.len(), "loaded rule file");
        Ok(registry)
    }

    /// Loads and merges every `*.json` document in the directory, in file
    /// name order.
    ///
    /// # Errors
    ///
    /// Returns the first read or parse error, or
    /// [`ConfigurationError::DuplicateRuleset`] when two documents declare
    /// rules for the same handler.
    pub fn load_all(&self) -> Result<InMemoryRuleRegistry, ConfigurationError> {
        let mut files = self
            .rule_file_names()
            .map_err(|error| unavailable(&self.root, &error))?;
        files.sort();

        files
            .iter()
            .try_fold(InMemoryRuleRegistry::new(), |registry, file| {
                registry.merge(self.load(Utf8Path::new(file))?)
            })
    }

    fn rule_file_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.dir.entries()? {
            let dir_entry = entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let name = dir_entry.file_name()?;
            if Utf8Path::new(&name).extension() == Some(RULE_FILE_EXTENSION) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

fn unavailable(path: &Utf8Path, error: &io::Error) -> ConfigurationError {
    ConfigurationError::RuleFileUnavailable {
        path: path.to_string(),
        reason: error.to_string(),
    }
}

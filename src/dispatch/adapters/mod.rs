//! Adapter implementations for dispatch ports.
//!
//! - [`memory`]: in-memory method mapper, plain dispatcher and rule registry
//! - [`rule_file`]: loading rule documents from a directory
//! - [`standard`]: checker for the standard and built-in constraint
//!   vocabularies

pub mod memory;
pub mod rule_file;
pub mod standard;

pub use memory::{InMemoryMethodMapper, InMemoryRuleRegistry, MethodRegistration, SimpleDispatcher};
pub use rule_file::RuleFileLoader;
pub use standard::StandardConstraintChecker;

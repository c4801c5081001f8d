//! Orchestration services for validated dispatch.
//!
//! - [`bind`]: positional and named argument binding with defaults
//! - [`validate`]: per-parameter constraint evaluation
//! - [`resolve_method`]: method, signature and ruleset resolution
//! - [`ValidatingDispatcher`]: the decorator tying the three together

pub mod binder;
pub mod orchestrator;
pub mod resolution;
pub mod validating;

pub use binder::bind;
pub use orchestrator::validate;
pub use resolution::{ResolvedMethod, resolve_method, verify_ruleset};
pub use validating::ValidatingDispatcher;

//! Port trait definitions for validated dispatch.
//!
//! Ports define the collaborators the dispatch core consumes: the method
//! resolver, the rule registry, the constraint checker, and the dispatcher
//! contract that the validating decorator both consumes and implements.

pub mod checker;
pub mod dispatcher;
pub mod resolver;
pub mod rules;

pub use checker::ConstraintChecker;
pub use dispatcher::Dispatcher;
pub use resolver::{MethodResolver, ResolvedHandler};
pub use rules::RuleRegistry;

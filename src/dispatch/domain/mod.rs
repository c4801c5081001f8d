//! Domain model for validated method dispatch.
//!
//! The domain describes methods, their formal parameters, the arguments a
//! caller supplies, and the constraint rules declared per parameter. It holds
//! no locks and performs no I/O; orchestration lives in
//! [`crate::dispatch::services`].

mod arguments;
mod constraint;
mod error;
mod fault;
mod ids;
mod signature;

pub use arguments::{Arguments, BoundArguments};
pub use constraint::{
    BUILTIN_NAMESPACE, Constraint, ConstraintId, ConstraintNamespace, Ruleset, STANDARD_NAMESPACE,
    Violation,
};
pub use error::{
    ArgumentError, ConfigurationError, ConstraintDefect, DispatchError, DispatchResult,
    HandlerError, MissingArgumentError, ParameterViolations, ResolutionError,
};
pub use fault::RpcFault;
pub use ids::{HandlerId, InvocationId, MethodName};
pub use signature::{MethodSignature, ParameterDescriptor, SignatureBuilder};

//! In-memory adapters for resolving, dispatching and storing rules.

mod dispatcher;
mod mapper;
mod rules;

pub use dispatcher::SimpleDispatcher;
pub use mapper::{HandlerFn, InMemoryMethodMapper, MethodRegistration};
pub use rules::InMemoryRuleRegistry;

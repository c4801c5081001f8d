//! Validated dispatch for RPC method calls.
//!
//! This module places a validation layer in front of an RPC dispatcher:
//! each call is resolved to its handler, its arguments are bound to the
//! handler's declared parameters, and declared constraints are checked
//! before the call is forwarded. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The shared constraint-namespace registry in [`vocabulary`]
//! - Dispatcher options in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod vocabulary;

#[cfg(test)]
mod tests;

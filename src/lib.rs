//! Paramguard: argument validation in front of RPC dispatchers.
//!
//! This crate wraps an RPC dispatcher with a layer that resolves the called
//! method, binds positional or named arguments to its parameters, and checks
//! declared constraints before the call reaches the handler. Calls that fail
//! validation are rejected with structured errors that map onto JSON-RPC
//! faults.
//!
//! # Architecture
//!
//! Paramguard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types for methods, signatures, constraints and errors
//! - **Ports**: Abstract trait interfaces for resolvers, rule registries,
//!   checkers and dispatchers
//! - **Adapters**: Concrete implementations of ports (in-memory registries,
//!   rule files, the standard constraint checker)
//!
//! # Modules
//!
//! - [`dispatch`]: Method resolution, argument binding and constraint
//!   validation

pub mod dispatch;

//! Unit tests for validated dispatch.

mod validating_tests;

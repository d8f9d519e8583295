//! Shared test helpers for `ewiki-core` integration tests.
//!
//! Provides an in-memory `WikiBackend` so use-case tests can focus on
//! behaviour instead of HTTP plumbing.

#![allow(dead_code)]

pub mod backend;

pub use backend::MockWikiBackend;

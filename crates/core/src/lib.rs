//! # EWiki Core
//!
//! Use cases built on the wiki backend contract - no HTTP code.
//!
//! This crate contains:
//! - The `WikiBackend` port implemented by the infrastructure client
//! - Chat sessions that keep conversation history in order
//! - Wiki overview loading (readme + module list)
//!
//! ## Architecture Principles
//! - Only depends on `ewiki-domain`
//! - All I/O goes through the `WikiBackend` trait
//! - Testable with in-memory backends

pub mod chat;
pub mod wiki;

pub use chat::ChatSession;
pub use wiki::ports::WikiBackend;
pub use wiki::service::{load_overview, WikiOverview};

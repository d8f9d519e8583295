//! # EWiki Domain
//!
//! Data types shared by every EWiki crate.
//!
//! This crate contains:
//! - Request/response shapes of the wiki backend API
//! - Domain error type and Result definition
//! - Configuration structures with their documented defaults
//! - The single-page frontend route table
//!
//! ## Architecture
//! - No dependencies on other EWiki crates
//! - No I/O: pure data structures and parsing

pub mod config;
pub mod constants;
pub mod errors;
pub mod routes;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use routes::Route;
pub use types::*;

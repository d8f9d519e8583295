//! # EWiki Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client
//! - The wiki API client (implements `ewiki_core::WikiBackend`)
//! - Configuration loading from files and environment
//! - The development server (API proxy + SPA routes)
//!
//! ## Architecture
//! - Implements traits defined in `ewiki-core`
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod dev_server;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiError, WikiApiClient};
pub use dev_server::DevServer;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};

//! Wiki backend API client
//!
//! HTTP-based client for the wiki backend mounted under `/api`: project
//! listing, import/upload, readme and module documents, chat, and the
//! knowledge-base endpoints.
//!
//! # Architecture
//!
//! - Uses the shared `HttpClient` (no direct reqwest clients)
//! - One request per operation, no retry, no cache
//! - Implements `ewiki_core::WikiBackend`

mod backend;
pub mod client;
pub mod errors;

pub use client::WikiApiClient;
pub use errors::ApiError;

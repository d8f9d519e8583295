//! Request and response shapes of the wiki backend API

pub mod chat;
pub mod ingest;
pub mod project;

pub use chat::{ChatReply, ChatRequest, ChatTurn};
pub use ingest::{ImportRequest, KnowledgeUpload, UploadRequest};
pub use project::{Document, KnowledgeFile};

/// Backend-defined payload of import/upload/delete calls.
///
/// The shape is not constrained by the client and is passed through as-is.
pub type BackendPayload = serde_json::Value;

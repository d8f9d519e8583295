//! Project content types

use serde::{Deserialize, Serialize};

/// Markdown document returned for a project readme or a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source file name, e.g. `PROJECT.md`. Not every backend sends it.
    #[serde(default)]
    pub file: Option<String>,
    pub content: String,
}

/// Entry of a project's knowledge base listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeFile {
    pub filename: String,
    pub size: u64,
    /// ISO-8601 timestamp as sent by the backend.
    pub upload_time: String,
}

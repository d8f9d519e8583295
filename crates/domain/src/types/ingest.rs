//! Project ingestion requests
//!
//! `language` defaults to [`DEFAULT_LANGUAGE`] when the caller does not set it.

use serde::Serialize;

use crate::constants::DEFAULT_LANGUAGE;

/// Body of `POST /import`: ingest a project from a server-side path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRequest {
    pub path: String,
    pub language: String,
}

impl ImportRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), language: DEFAULT_LANGUAGE.to_string() }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Multipart body of `POST /upload`: ingest a project archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub language: String,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes, language: DEFAULT_LANGUAGE.to_string() }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Multipart body of `POST /{project}/knowledge/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub description: String,
}

impl KnowledgeUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes, description: String::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

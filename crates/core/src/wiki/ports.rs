//! Port interface for the wiki backend
//!
//! The boundary between the use cases in this crate and the HTTP client in
//! `ewiki-infra`. Every method maps to exactly one backend request; failures
//! are transport/HTTP errors propagated unchanged.

use async_trait::async_trait;
use ewiki_domain::{
    BackendPayload, ChatReply, ChatRequest, ImportRequest, KnowledgeFile, KnowledgeUpload,
    Result, UploadRequest,
};

/// Operations of the wiki backend API
#[async_trait]
pub trait WikiBackend: Send + Sync {
    /// Names of all projects with a generated wiki, in backend order
    async fn list_projects(&self) -> Result<Vec<String>>;

    /// Ingest a project from a server-side path
    async fn import_project(&self, request: ImportRequest) -> Result<BackendPayload>;

    /// Ingest a project from an uploaded archive
    async fn upload_project(&self, request: UploadRequest) -> Result<BackendPayload>;

    /// Markdown overview of a project
    async fn project_readme(&self, project: &str) -> Result<String>;

    /// Module names of a project, in backend order
    async fn list_modules(&self, project: &str) -> Result<Vec<String>>;

    /// Markdown of one module
    async fn module(&self, project: &str, name: &str) -> Result<String>;

    /// Ask a question about a project; returns the full reply
    async fn chat_detailed(&self, project: &str, request: ChatRequest) -> Result<ChatReply>;

    /// Ask a question about a project; returns only the answer.
    ///
    /// Backends that can decode the answer on its own should override this so
    /// the optional reply fields never affect it.
    async fn chat(&self, project: &str, request: ChatRequest) -> Result<String> {
        Ok(self.chat_detailed(project, request).await?.answer)
    }

    /// Delete a project together with its wiki
    async fn delete_project(&self, project: &str) -> Result<BackendPayload>;

    /// Files in a project's knowledge base
    async fn list_knowledge_files(&self, project: &str) -> Result<Vec<KnowledgeFile>>;

    /// Add a file to a project's knowledge base
    async fn upload_knowledge_file(
        &self,
        project: &str,
        upload: KnowledgeUpload,
    ) -> Result<BackendPayload>;

    /// Remove a file from a project's knowledge base
    async fn delete_knowledge_file(&self, project: &str, filename: &str)
        -> Result<BackendPayload>;
}

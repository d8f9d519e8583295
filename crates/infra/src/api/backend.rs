//! `WikiBackend` port implementation backed by the HTTP client

use async_trait::async_trait;
use ewiki_core::WikiBackend;
use ewiki_domain::{
    BackendPayload, ChatReply, ChatRequest, ImportRequest, KnowledgeFile, KnowledgeUpload,
    Result, UploadRequest,
};

use super::client::WikiApiClient;

#[async_trait]
impl WikiBackend for WikiApiClient {
    async fn list_projects(&self) -> Result<Vec<String>> {
        Ok(WikiApiClient::list_projects(self).await?)
    }

    async fn import_project(&self, request: ImportRequest) -> Result<BackendPayload> {
        Ok(WikiApiClient::import_project(self, request).await?)
    }

    async fn upload_project(&self, request: UploadRequest) -> Result<BackendPayload> {
        Ok(WikiApiClient::upload_project(self, request).await?)
    }

    async fn project_readme(&self, project: &str) -> Result<String> {
        Ok(WikiApiClient::project_readme(self, project).await?)
    }

    async fn list_modules(&self, project: &str) -> Result<Vec<String>> {
        Ok(WikiApiClient::list_modules(self, project).await?)
    }

    async fn module(&self, project: &str, name: &str) -> Result<String> {
        Ok(WikiApiClient::module(self, project, name).await?)
    }

    async fn chat_detailed(&self, project: &str, request: ChatRequest) -> Result<ChatReply> {
        Ok(WikiApiClient::chat_detailed(self, project, request).await?)
    }

    async fn chat(&self, project: &str, request: ChatRequest) -> Result<String> {
        Ok(WikiApiClient::chat(self, project, request).await?)
    }

    async fn delete_project(&self, project: &str) -> Result<BackendPayload> {
        Ok(WikiApiClient::delete_project(self, project).await?)
    }

    async fn list_knowledge_files(&self, project: &str) -> Result<Vec<KnowledgeFile>> {
        Ok(WikiApiClient::list_knowledge_files(self, project).await?)
    }

    async fn upload_knowledge_file(
        &self,
        project: &str,
        upload: KnowledgeUpload,
    ) -> Result<BackendPayload> {
        Ok(WikiApiClient::upload_knowledge_file(self, project, upload).await?)
    }

    async fn delete_knowledge_file(&self, project: &str, filename: &str) -> Result<BackendPayload> {
        Ok(WikiApiClient::delete_knowledge_file(self, project, filename).await?)
    }
}

//! In-memory mock for the `WikiBackend` port

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ewiki_core::WikiBackend;
use ewiki_domain::{
    BackendPayload, ChatReply, ChatRequest, EwikiError, ImportRequest, KnowledgeFile,
    KnowledgeUpload, Result as DomainResult, UploadRequest,
};
use serde_json::json;

/// Mock backend seeded with project content.
///
/// Chat answers are scripted in order; every chat request is recorded so
/// tests can assert on the history that was sent.
#[derive(Default, Clone)]
pub struct MockWikiBackend {
    readmes: HashMap<String, String>,
    modules: HashMap<String, Vec<String>>,
    answers: Arc<Mutex<Vec<DomainResult<String>>>>,
    chat_requests: Arc<Mutex<Vec<(String, ChatRequest)>>>,
}

impl MockWikiBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project with its readme and module names.
    pub fn with_project(mut self, project: &str, readme: &str, modules: &[&str]) -> Self {
        self.readmes.insert(project.to_string(), readme.to_string());
        self.modules
            .insert(project.to_string(), modules.iter().map(|m| (*m).to_string()).collect());
        self
    }

    /// Queue the outcome of the next chat call.
    pub fn with_answer(self, answer: DomainResult<String>) -> Self {
        self.answers.lock().unwrap().push(answer);
        self
    }

    /// Chat requests received so far, oldest first.
    pub fn chat_requests(&self) -> Vec<(String, ChatRequest)> {
        self.chat_requests.lock().unwrap().clone()
    }

    fn not_found(what: &str) -> EwikiError {
        EwikiError::Http(format!("404 Not Found: {what}"))
    }
}

#[async_trait]
impl WikiBackend for MockWikiBackend {
    async fn list_projects(&self) -> DomainResult<Vec<String>> {
        let mut projects: Vec<String> = self.readmes.keys().cloned().collect();
        projects.sort();
        Ok(projects)
    }

    async fn import_project(&self, request: ImportRequest) -> DomainResult<BackendPayload> {
        Ok(json!({ "project": request.path }))
    }

    async fn upload_project(&self, request: UploadRequest) -> DomainResult<BackendPayload> {
        Ok(json!({ "project": request.file_name }))
    }

    async fn project_readme(&self, project: &str) -> DomainResult<String> {
        self.readmes.get(project).cloned().ok_or_else(|| Self::not_found(project))
    }

    async fn list_modules(&self, project: &str) -> DomainResult<Vec<String>> {
        self.modules.get(project).cloned().ok_or_else(|| Self::not_found(project))
    }

    async fn module(&self, project: &str, name: &str) -> DomainResult<String> {
        self.modules
            .get(project)
            .filter(|modules| modules.iter().any(|m| m == name))
            .map(|_| format!("# {name}"))
            .ok_or_else(|| Self::not_found(name))
    }

    async fn chat_detailed(
        &self,
        project: &str,
        request: ChatRequest,
    ) -> DomainResult<ChatReply> {
        self.chat_requests.lock().unwrap().push((project.to_string(), request));

        let mut answers = self.answers.lock().unwrap();
        let next = if answers.is_empty() {
            Err(EwikiError::Internal("no scripted answer".into()))
        } else {
            answers.remove(0)
        };

        next.map(|answer| ChatReply {
            answer,
            sources: Vec::new(),
            project: Some(project.to_string()),
            context_count: Some(0),
            has_knowledge: Some(false),
        })
    }

    async fn delete_project(&self, project: &str) -> DomainResult<BackendPayload> {
        Ok(json!({ "message": format!("deleted {project}") }))
    }

    async fn list_knowledge_files(&self, _project: &str) -> DomainResult<Vec<KnowledgeFile>> {
        Ok(Vec::new())
    }

    async fn upload_knowledge_file(
        &self,
        _project: &str,
        upload: KnowledgeUpload,
    ) -> DomainResult<BackendPayload> {
        Ok(json!({ "filename": upload.file_name }))
    }

    async fn delete_knowledge_file(
        &self,
        _project: &str,
        filename: &str,
    ) -> DomainResult<BackendPayload> {
        Ok(json!({ "message": format!("deleted {filename}") }))
    }
}

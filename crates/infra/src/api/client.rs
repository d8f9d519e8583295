//! Wiki API client
//!
//! One shared client scoped to the backend base path (`/api` by default).
//! Every operation formats a URL, attaches a JSON or multipart body when it
//! has one, sends exactly one request and unwraps the relevant response
//! field. Nothing is retried or cached.

use std::borrow::Cow;
use std::time::Duration;

use ewiki_domain::{
    ApiConfig, BackendPayload, ChatReply, ChatRequest, Document, EwikiError, ImportRequest,
    KnowledgeFile, KnowledgeUpload, UploadRequest,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Typed client for the wiki backend
#[derive(Debug, Clone)]
pub struct WikiApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl WikiApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is not absolute or the
    /// HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url();
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {base_url:?}: {e}")))?;

        let mut builder = HttpClient::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client, base_url })
    }

    /// Client whose operations resolve directly under `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(&ApiConfig::with_base_url(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /projects`
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<String>, ApiError> {
        self.get("/projects").await
    }

    /// `POST /import` with body `{path, language}`
    #[instrument(skip(self, request), fields(path = %request.path, language = %request.language))]
    pub async fn import_project(&self, request: ImportRequest) -> Result<BackendPayload, ApiError> {
        self.post_json("/import", &request).await
    }

    /// `POST /upload` with multipart fields `file` and `language`
    #[instrument(skip(self, request), fields(file = %request.file_name, bytes = request.bytes.len(), language = %request.language))]
    pub async fn upload_project(&self, request: UploadRequest) -> Result<BackendPayload, ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(request.bytes).file_name(request.file_name))
            .text("language", request.language);

        self.post_multipart("/upload", form).await
    }

    /// `GET /{project}/project`, unwrapped to the `content` field
    #[instrument(skip(self))]
    pub async fn project_readme(&self, project: &str) -> Result<String, ApiError> {
        let document: Document = self.get(&format!("/{}/project", segment(project))).await?;
        Ok(document.content)
    }

    /// `GET /{project}/modules`
    #[instrument(skip(self))]
    pub async fn list_modules(&self, project: &str) -> Result<Vec<String>, ApiError> {
        self.get(&format!("/{}/modules", segment(project))).await
    }

    /// `GET /{project}/modules/{name}`, unwrapped to the `content` field
    #[instrument(skip(self))]
    pub async fn module(&self, project: &str, name: &str) -> Result<String, ApiError> {
        let document: Document =
            self.get(&format!("/{}/modules/{}", segment(project), segment(name))).await?;
        Ok(document.content)
    }

    /// `POST /{project}/chat` with body `{question, history}`, unwrapped to
    /// the `answer` field. The rest of the reply is not decoded.
    #[instrument(skip(self, request), fields(history = request.history.len()))]
    pub async fn chat(&self, project: &str, request: ChatRequest) -> Result<String, ApiError> {
        let reply: AnswerOnly =
            self.post_json(&format!("/{}/chat", segment(project)), &request).await?;
        Ok(reply.answer)
    }

    /// `POST /{project}/chat`, returning the full reply
    #[instrument(skip(self, request), fields(history = request.history.len()))]
    pub async fn chat_detailed(
        &self,
        project: &str,
        request: ChatRequest,
    ) -> Result<ChatReply, ApiError> {
        self.post_json(&format!("/{}/chat", segment(project)), &request).await
    }

    /// `DELETE /projects/{project}`
    #[instrument(skip(self))]
    pub async fn delete_project(&self, project: &str) -> Result<BackendPayload, ApiError> {
        self.delete(&format!("/projects/{}", segment(project))).await
    }

    /// `GET /{project}/knowledge/files`
    #[instrument(skip(self))]
    pub async fn list_knowledge_files(
        &self,
        project: &str,
    ) -> Result<Vec<KnowledgeFile>, ApiError> {
        self.get(&format!("/{}/knowledge/files", segment(project))).await
    }

    /// `POST /{project}/knowledge/upload?description=...` with multipart
    /// field `file`
    #[instrument(skip(self, upload), fields(file = %upload.file_name, bytes = upload.bytes.len()))]
    pub async fn upload_knowledge_file(
        &self,
        project: &str,
        upload: KnowledgeUpload,
    ) -> Result<BackendPayload, ApiError> {
        let url = self.url(&format!("/{}/knowledge/upload", segment(project)));
        let form =
            Form::new().part("file", Part::bytes(upload.bytes).file_name(upload.file_name));

        debug!(url = %url, "POST multipart request");
        let request = self
            .http_client
            .request(Method::POST, &url)
            .query(&[("description", upload.description.as_str())])
            .multipart(form);

        self.execute(request, &url).await
    }

    /// `DELETE /{project}/knowledge/files/{filename}`
    #[instrument(skip(self))]
    pub async fn delete_knowledge_file(
        &self,
        project: &str,
        filename: &str,
    ) -> Result<BackendPayload, ApiError> {
        self.delete(&format!("/{}/knowledge/files/{}", segment(project), segment(filename)))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, &url);
        self.execute(request, &url).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let request = self.http_client.request(Method::POST, &url).json(body);
        self.execute(request, &url).await
    }

    async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST multipart request");

        // reqwest sets `Content-Type: multipart/form-data; boundary=...`
        let request = self.http_client.request(Method::POST, &url).multipart(form);
        self.execute(request, &url).await
    }

    async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE request");

        let request = self.http_client.request(Method::DELETE, &url);
        self.execute(request, &url).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<R, ApiError> {
        let response = self.http_client.send(request).await.map_err(Self::map_domain_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), url: url.to_string(), body });
        }

        // Handle 204/205 No Content responses
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but a body was expected",
                    status.as_u16()
                ))
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Self::map_domain_error(InfraError::from(e).into()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_domain_error(err: EwikiError) -> ApiError {
        match err {
            EwikiError::Config(message) => ApiError::Config(message),
            EwikiError::Decode(message) => ApiError::Decode(message),
            EwikiError::Network(message)
            | EwikiError::Http(message)
            | EwikiError::Io(message)
            | EwikiError::Internal(message) => ApiError::Network(message),
        }
    }
}

#[derive(Deserialize)]
struct AnswerOnly {
    answer: String,
}

/// Percent-encode an identifier so it stays a single path segment.
fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

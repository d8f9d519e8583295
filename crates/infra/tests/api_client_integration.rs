//! Integration tests for `WikiApiClient` against a WireMock backend
//!
//! **Coverage:**
//! - Request shape per operation (method, path, JSON / multipart body)
//! - Response unwrapping (`content`, `answer`)
//! - Non-2xx and connection failures reject for every operation
//! - The `WikiBackend` port implementation

use ewiki_core::{load_overview, ChatSession, WikiBackend};
use ewiki_domain::{
    ApiConfig, ChatRequest, ChatTurn, ImportRequest, KnowledgeUpload, UploadRequest,
};
use ewiki_infra::{ApiError, WikiApiClient};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client scoped to `{server}/api`, like the browser app behind the dev proxy.
fn client_for(server: &MockServer) -> WikiApiClient {
    let config = ApiConfig { origin: server.uri(), ..ApiConfig::default() };
    WikiApiClient::new(&config).expect("client should build")
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one outbound request");
    requests.remove(0)
}

fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn list_projects_returns_names_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["acme", "zeta", "beta"])))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client_for(&server).list_projects().await.unwrap();
    assert_eq!(projects, vec!["acme", "zeta", "beta"]);
}

#[tokio::test]
async fn list_projects_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client_for(&server).list_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn import_defaults_language_to_zh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/import"))
        .and(body_json(json!({"path": "/repos/acme", "language": "zh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload =
        client_for(&server).import_project(ImportRequest::new("/repos/acme")).await.unwrap();
    assert_eq!(payload, json!({"status": "ok"}));
}

#[tokio::test]
async fn import_sends_explicit_language() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"project": "acme"})))
        .mount(&server)
        .await;

    let request = ImportRequest::new("/repos/acme").with_language("en");
    client_for(&server).import_project(request).await.unwrap();

    let sent = only_request(&server).await;
    assert_eq!(json_body(&sent), json!({"path": "/repos/acme", "language": "en"}));
}

#[tokio::test]
async fn upload_sends_two_field_multipart_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"project": "acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = UploadRequest::new("acme.zip", b"PK-archive-bytes".to_vec());
    let payload = client_for(&server).upload_project(request).await.unwrap();
    assert_eq!(payload["project"], "acme");

    let sent = only_request(&server).await;
    let content_type = sent
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .expect("content type header")
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");

    let body = String::from_utf8_lossy(&sent.body).to_ascii_lowercase();
    assert_eq!(body.matches("content-disposition: form-data; name=").count(), 2, "{body}");
    assert!(body.contains(r#"name="file"; filename="acme.zip""#));
    assert!(body.contains(r#"name="language""#));
    assert!(body.contains("pk-archive-bytes"));
    assert!(body.contains("\r\n\r\nzh\r\n"));
}

#[tokio::test]
async fn delete_project_targets_projects_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": "acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server).delete_project("acme").await.unwrap();
    assert_eq!(payload["deleted"], "acme");
}

// ============================================================================
// Documents
// ============================================================================

#[tokio::test]
async fn readme_issues_one_get_and_unwraps_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/project"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"file": "README.md", "content": "# Acme\n\nOverview"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let readme = client_for(&server).project_readme("acme").await.unwrap();
    assert_eq!(readme, "# Acme\n\nOverview");
}

#[tokio::test]
async fn readme_without_content_field_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file": "README.md"})))
        .mount(&server)
        .await;

    let err = client_for(&server).project_readme("acme").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn list_modules_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["intro.md", "setup.md"])))
        .expect(1)
        .mount(&server)
        .await;

    let modules = client_for(&server).list_modules("acme").await.unwrap();
    assert_eq!(modules, vec!["intro.md", "setup.md"]);
}

#[tokio::test]
async fn module_unwraps_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/modules/intro.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "# Intro"})))
        .expect(1)
        .mount(&server)
        .await;

    let module = client_for(&server).module("acme", "intro.md").await.unwrap();
    assert_eq!(module, "# Intro");
}

#[tokio::test]
async fn identifiers_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": ""})))
        .mount(&server)
        .await;

    client_for(&server).module("my project", "a/b.md").await.unwrap();

    let sent = only_request(&server).await;
    assert_eq!(sent.url.path(), "/api/my%20project/modules/a%2Fb.md");
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn chat_defaults_history_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .and(body_json(json!({"question": "what is X?", "history": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "X is..."})))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server).chat("acme", ChatRequest::new("what is X?")).await.unwrap();
    assert_eq!(answer, "X is...");
}

#[tokio::test]
async fn chat_sends_history_with_one_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "X is..."})))
        .mount(&server)
        .await;

    let request = ChatRequest::new("what is X?").with_history(vec![ChatTurn::user("hi")]);
    let answer = client_for(&server).chat("acme", request).await.unwrap();
    assert_eq!(answer, "X is...");

    let body = json_body(&only_request(&server).await);
    assert_eq!(body["history"], json!([{"role": "user", "content": "hi"}]));
}

#[tokio::test]
async fn chat_preserves_history_order_and_opaque_turns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "ok"})))
        .mount(&server)
        .await;

    let history = vec![
        ChatTurn::user("first"),
        ChatTurn::assistant("second"),
        ChatTurn::from(json!({"role": "user", "text": "third", "ts": 3})),
    ];
    let request = ChatRequest::new("fourth").with_history(history);
    client_for(&server).chat("acme", request).await.unwrap();

    let body = json_body(&only_request(&server).await);
    assert_eq!(
        body["history"],
        json!([
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "second"},
            {"role": "user", "text": "third", "ts": 3}
        ])
    );
    assert!(body.get("topk").is_none());
}

#[tokio::test]
async fn chat_detailed_returns_sources_and_sends_topk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .and(body_json(json!({"question": "q", "history": [], "topk": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "a",
            "sources": ["intro.md"],
            "project": "acme",
            "context_count": 2,
            "has_knowledge": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply =
        client_for(&server).chat_detailed("acme", ChatRequest::new("q").with_top_k(3)).await.unwrap();
    assert_eq!(reply.answer, "a");
    assert_eq!(reply.sources, vec![json!("intro.md")]);
    assert_eq!(reply.context_count, Some(2));
    assert_eq!(reply.has_knowledge, Some(true));
}

#[tokio::test]
async fn chat_answer_survives_null_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"answer": "X is...", "sources": null})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.chat("acme", ChatRequest::new("what is X?")).await.unwrap(), "X is...");

    let backend: &dyn WikiBackend = &client;
    assert_eq!(backend.chat("acme", ChatRequest::new("what is X?")).await.unwrap(), "X is...");

    let reply = client.chat_detailed("acme", ChatRequest::new("what is X?")).await.unwrap();
    assert_eq!(reply.answer, "X is...");
    assert!(reply.sources.is_empty());
}

#[tokio::test]
async fn chat_answer_survives_structured_sources_and_float_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "X is...",
            "sources": [{"file": "a.md"}],
            "context_count": 1.0
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.chat("acme", ChatRequest::new("what is X?")).await.unwrap(), "X is...");

    let mut session = ChatSession::new("acme");
    assert_eq!(session.ask(&client, "what is X?").await.unwrap(), "X is...");
    assert_eq!(session.history().len(), 2);

    let reply = client.chat_detailed("acme", ChatRequest::new("what is X?")).await.unwrap();
    assert_eq!(reply.sources, vec![json!({"file": "a.md"})]);
    assert_eq!(reply.context_count, Some(1));
}

#[tokio::test]
async fn chat_without_answer_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sources": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).chat("acme", ChatRequest::new("q")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

// ============================================================================
// Knowledge base
// ============================================================================

#[tokio::test]
async fn knowledge_files_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/knowledge/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"filename": "faq.md", "size": 120, "upload_time": "2024-05-01 10:00:00"}
        ])))
        .mount(&server)
        .await;

    let files = client_for(&server).list_knowledge_files("acme").await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "faq.md");
    assert_eq!(files[0].size, 120);
}

#[tokio::test]
async fn knowledge_upload_sends_description_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/acme/knowledge/upload"))
        .and(query_param("description", "release notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": "notes.md"})))
        .expect(1)
        .mount(&server)
        .await;

    let upload =
        KnowledgeUpload::new("notes.md", b"# Notes".to_vec()).with_description("release notes");
    let payload = client_for(&server).upload_knowledge_file("acme", upload).await.unwrap();
    assert_eq!(payload["filename"], "notes.md");

    let sent = only_request(&server).await;
    let body = String::from_utf8_lossy(&sent.body).to_ascii_lowercase();
    assert_eq!(body.matches("content-disposition: form-data; name=").count(), 1);
    assert!(body.contains(r#"name="file"; filename="notes.md""#));
}

#[tokio::test]
async fn knowledge_file_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/acme/knowledge/files/faq.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": "faq.md"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server).delete_knowledge_file("acme", "faq.md").await.unwrap();
    assert_eq!(payload["deleted"], "faq.md");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn status_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/missing/project"))
        .respond_with(ResponseTemplate::new(404).set_body_string("project not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).project_readme("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
    assert!(err.to_string().contains("project not found"), "{err}");
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).list_projects().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn every_operation_rejects_on_non_2xx() {
    // Unmatched requests get 404 from WireMock.
    let server = MockServer::start().await;
    let client = client_for(&server);

    let results: Vec<(&str, Result<(), ApiError>)> = vec![
        ("list_projects", client.list_projects().await.map(drop)),
        ("import", client.import_project(ImportRequest::new("/p")).await.map(drop)),
        ("upload", client.upload_project(UploadRequest::new("p.zip", vec![1])).await.map(drop)),
        ("readme", client.project_readme("acme").await.map(drop)),
        ("modules", client.list_modules("acme").await.map(drop)),
        ("module", client.module("acme", "intro.md").await.map(drop)),
        ("chat", client.chat("acme", ChatRequest::new("q")).await.map(drop)),
        ("delete", client.delete_project("acme").await.map(drop)),
        ("knowledge_list", client.list_knowledge_files("acme").await.map(drop)),
        (
            "knowledge_upload",
            client
                .upload_knowledge_file("acme", KnowledgeUpload::new("f.md", vec![1]))
                .await
                .map(drop),
        ),
        ("knowledge_delete", client.delete_knowledge_file("acme", "f.md").await.map(drop)),
    ];

    for (operation, result) in results {
        let err = result.expect_err(operation);
        assert_eq!(err.status(), Some(404), "{operation}: {err:?}");
    }
}

#[tokio::test]
async fn every_operation_rejects_on_connection_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = WikiApiClient::with_base_url(format!("http://{addr}/api")).unwrap();

    let results: Vec<(&str, Result<(), ApiError>)> = vec![
        ("list_projects", client.list_projects().await.map(drop)),
        ("import", client.import_project(ImportRequest::new("/p")).await.map(drop)),
        ("upload", client.upload_project(UploadRequest::new("p.zip", vec![1])).await.map(drop)),
        ("readme", client.project_readme("acme").await.map(drop)),
        ("modules", client.list_modules("acme").await.map(drop)),
        ("module", client.module("acme", "intro.md").await.map(drop)),
        ("chat", client.chat("acme", ChatRequest::new("q")).await.map(drop)),
        ("chat_detailed", client.chat_detailed("acme", ChatRequest::new("q")).await.map(drop)),
        ("delete", client.delete_project("acme").await.map(drop)),
        ("knowledge_list", client.list_knowledge_files("acme").await.map(drop)),
        (
            "knowledge_upload",
            client
                .upload_knowledge_file("acme", KnowledgeUpload::new("f.md", vec![1]))
                .await
                .map(drop),
        ),
        ("knowledge_delete", client.delete_knowledge_file("acme", "f.md").await.map(drop)),
    ];

    assert_eq!(results.len(), 12);
    for (operation, result) in results {
        let err = result.expect_err(operation);
        assert!(matches!(err, ApiError::Network(_)), "{operation}: {err:?}");
    }
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_modules("acme").await.unwrap_err();
    match err {
        ApiError::Decode(message) => {
            assert!(message.starts_with("invalid JSON at line 1 column 1"), "{message}");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

// ============================================================================
// WikiBackend port
// ============================================================================

#[tokio::test]
async fn backend_port_loads_overview_and_maps_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/acme/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "# Acme"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/acme/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["intro.md"])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let overview = load_overview(&client, "acme").await.unwrap();
    assert_eq!(overview.readme, "# Acme");
    assert_eq!(overview.modules, vec!["intro.md"]);

    let backend: &dyn WikiBackend = &client;
    let err = backend.list_projects().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert!(err.to_string().contains("404"), "{err}");
}

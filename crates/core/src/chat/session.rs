//! Chat session - keeps the history the backend expects with each question

use ewiki_domain::{ChatReply, ChatRequest, ChatTurn, Result};
use tracing::{debug, instrument};

use crate::wiki::ports::WikiBackend;

/// Conversation with one project.
///
/// History is chronological. A turn pair (question, answer) is appended only
/// after the backend answered, so a failed call leaves the session unchanged.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    project: String,
    history: Vec<ChatTurn>,
    top_k: Option<u32>,
}

impl ChatSession {
    pub fn new(project: impl Into<String>) -> Self {
        Self { project: project.into(), history: Vec::new(), top_k: None }
    }

    /// Seed the session with earlier turns.
    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    /// Retrieval depth sent with every question.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Ask a question and return the answer.
    #[instrument(skip(self, backend, question), fields(project = %self.project, turns = self.history.len()))]
    pub async fn ask(&mut self, backend: &dyn WikiBackend, question: &str) -> Result<String> {
        let answer = backend.chat(&self.project, self.request(question)).await?;
        self.record(question, answer.clone());
        Ok(answer)
    }

    /// Ask a question and return the backend's full reply.
    #[instrument(skip(self, backend, question), fields(project = %self.project, turns = self.history.len()))]
    pub async fn ask_detailed(
        &mut self,
        backend: &dyn WikiBackend,
        question: &str,
    ) -> Result<ChatReply> {
        let reply = backend.chat_detailed(&self.project, self.request(question)).await?;
        self.record(question, reply.answer.clone());
        Ok(reply)
    }

    fn request(&self, question: &str) -> ChatRequest {
        let mut request = ChatRequest::new(question).with_history(self.history.clone());
        request.top_k = self.top_k;
        request
    }

    fn record(&mut self, question: &str, answer: String) {
        self.history.push(ChatTurn::user(question));
        self.history.push(ChatTurn::assistant(answer));
        debug!(turns = self.history.len(), "chat history extended");
    }
}

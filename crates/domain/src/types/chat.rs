//! Chat types
//!
//! History entries are opaque to the client: whatever the caller supplies is
//! sent verbatim and in order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::constants::{ROLE_ASSISTANT, ROLE_USER};

/// One prior exchange in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatTurn(pub Value);

impl ChatTurn {
    /// Build a `{"role": ..., "content": ...}` turn.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self(json!({ "role": role.into(), "content": content.into() }))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }

    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }
}

impl From<Value> for ChatTurn {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Body of `POST /{project}/chat`.
///
/// `history` defaults to empty. `topk` is only sent when set, leaving the
/// backend's retrieval depth in charge otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub history: Vec<ChatTurn>,
    #[serde(rename = "topk", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into(), history: Vec::new(), top_k: None }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Response of `POST /{project}/chat`.
///
/// Only `answer` is required. The other fields are informational: a missing,
/// `null` or oddly shaped value decodes as empty instead of failing the reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    /// Retrieved passages, passed through as the backend sent them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub context_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_knowledge: Option<bool>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Accepts `2` as well as `2.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
            .map(|n| n as u64)
    });
    Ok(count.and_then(|n| u32::try_from(n).ok()))
}

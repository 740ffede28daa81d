// src/protocol/mod.rs

pub mod parse;
pub mod request;

pub use request::PlanningRequest;

use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// One request or reply exchanged with an agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: Content,
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text { text: text.into() },
            role: MessageRole::User,
            metadata: None,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        match &self.content {
            Content::Text { text } => text,
        }
    }
}

/// Request/response transport to a single agent at `{base_url}/a2a`.
#[derive(Clone, Debug)]
pub struct AgentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AgentClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/a2a", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `text` as a user message. A reply carrying an `error` field is
    /// turned into [`ServiceError::Rejected`].
    pub async fn send(&self, text: &str) -> Result<Message, ServiceError> {
        debug!(endpoint = %self.endpoint, "sending agent message");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&Message::user(text))
            .send()
            .await?
            .error_for_status()?;

        let reply: Message = response.json().await?;

        match reply.error {
            Some(err) => Err(ServiceError::Rejected(err)),
            None => Ok(reply),
        }
    }
}

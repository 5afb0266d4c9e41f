//! Optional external paraphrase model.
//!
//! The composer treats the model as a best-effort enhancement: the client
//! is only constructed when a credential is configured, and every failure
//! path falls back to the template strategy upstream.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use gaffer_core::config::ModelConfig;

use crate::error::ChatError;

const SYSTEM_PROMPT: &str = "You are a fantasy football assistant. Rewrite the provided notes \
     into a short, direct answer to the manager's question. Use only the \
     information in the notes.";

/// Seam to an external language model used for answer paraphrasing.
#[async_trait]
pub trait ParaphraseModel: Send + Sync {
    /// Rewrite the context block as an answer to the query.
    async fn paraphrase(&self, query: &str, context: &str) -> Result<String, ChatError>;
}

/// OpenAI-compatible chat-completions client with a bounded timeout.
pub struct HttpParaphraseModel {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl HttpParaphraseModel {
    /// Build a client from configuration, if a credential is present.
    ///
    /// Returns `None` without a credential, which keeps the composer on
    /// the template strategy.
    pub fn from_config(config: &ModelConfig) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ParaphraseModel for HttpParaphraseModel {
    async fn paraphrase(&self, query: &str, context: &str) -> Result<String, ChatError> {
        let body = json!({
            "model": self.model_id,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Question: {}\n\nNotes:\n{}", query, context)
                },
            ],
            "temperature": 0.3,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::ModelError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::ModelError(format!(
                "model endpoint returned {}",
                response.status()
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::ModelError(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatError::ModelError("empty completion".to_string()))?;

        debug!(model = %self.model_id, chars = text.len(), "Paraphrase received");
        Ok(text)
    }
}

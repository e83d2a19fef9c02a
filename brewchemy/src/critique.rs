//! Recipe critiques from an OpenAI-compatible chat completion API.
//!
//! Requests and responses use the `async-openai` wire types; transport is the shared
//! [`reqwest::Client`] so timeouts, TLS and test servers work the same as for Google sign-in.

use anyhow::{Context, anyhow};
use async_openai::types::chat::{
    ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
    CreateChatCompletionResponse,
};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::OpenAiConfig;

pub const CRITIQUE_PROMPT: &str = "You will objectively critique the recipe in three lines.";

pub struct CritiqueClient<'a> {
    http: &'a Client,
    config: &'a OpenAiConfig,
    api_key: &'a str,
}

impl<'a> CritiqueClient<'a> {
    /// `None` when no API key is configured.
    pub fn new(http: &'a Client, config: &'a OpenAiConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref().filter(|key| !key.is_empty())?;
        Some(Self { http, config, api_key })
    }

    fn request(&self, recipe: &str) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatCompletionRequestSystemMessage::from(CRITIQUE_PROMPT).into(),
                ChatCompletionRequestUserMessage::from(recipe).into(),
            ],
            ..Default::default()
        }
    }

    /// Ask the model for a critique of `recipe` and return its reply text.
    #[instrument(skip_all, fields(model = %self.config.model), err)]
    pub async fn critique(&self, recipe: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.config.api_base.as_str().trim_end_matches('/'));

        let response = self
            .http
            .post(url)
            .bearer_auth(self.api_key)
            .timeout(self.config.timeout)
            .json(&self.request(recipe))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("chat completion endpoint returned {status}: {body}"));
        }

        let completion: CreateChatCompletionResponse = response.json().await.context("decode chat completion response")?;
        debug!(completion_id = %completion.id, "Received recipe critique");

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("chat completion returned no content")
    }
}

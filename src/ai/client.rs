use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ConfigError, OpenAiConfig};

use super::{
    inference::{build_request, parse_response},
    LanguageModel, LlmError, Prompt,
};

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(http: Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: Prompt) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let request = build_request(self.config.model.clone(), prompt);
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        parse_response(response).await
    }
}

//! OpenRouter HTTP client for model listing and chat completions

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ChatBackend, ModelCatalog, ModelListing};
use crate::config::Config;
use crate::{Error, Result};

/// OpenRouter API client
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    referer: String,
}

impl OpenRouterClient {
    /// Create a client from skill configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.openrouter.timeout)
            .connect_timeout(config.openrouter.timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config
                .api_key
                .as_ref()
                .map(|k| SecretString::new(k.expose_secret().into())),
            base_url: config.openrouter.base_url.clone(),
            referer: config.openrouter.referer.clone(),
        })
    }

    fn bearer(&self) -> Result<String> {
        self.api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k.expose_secret()))
            .ok_or_else(|| Error::Config("OPENROUTER_API_KEY not configured".to_string()))
    }
}

#[async_trait]
impl ModelCatalog for OpenRouterClient {
    async fn list_models(&self) -> Result<Vec<ModelListing>> {
        let auth = self.bearer()?;
        let url = format!("{}/v1/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", auth)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let listing: ModelListResponse = response.json().await?;
        Ok(listing.into_models())
    }
}

#[async_trait]
impl ChatBackend for OpenRouterClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let auth = self.bearer()?;
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .header("HTTP-Referer", &self.referer)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let result: ChatCompletionResponse = response.json().await?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::InvalidResponse("completion had no choices".to_string()))
    }
}

/// Listing body: either a bare array or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelListResponse {
    Bare(Vec<ModelListing>),
    Wrapped { data: Vec<ModelListing> },
}

impl ModelListResponse {
    fn into_models(self) -> Vec<ModelListing> {
        match self {
            Self::Bare(models) | Self::Wrapped { data: models } => models,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_bare_array() {
        let body = r#"[{"id":"openai/gpt-5","capabilities":["chat"],"created_at":"2025-01-01"}]"#;
        let listing: ModelListResponse = serde_json::from_str(body).unwrap();
        let models = listing.into_models();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "openai/gpt-5");
        assert!(models[0].supports("chat"));
        assert_eq!(models[0].created_at.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_listing_accepts_data_wrapper() {
        let body = r#"{"data":[
            {"id":"openai/gpt-4o"},
            {"id":"anthropic/claude","capabilities":["chat"]}
        ]}"#;
        let listing: ModelListResponse = serde_json::from_str(body).unwrap();
        let models = listing.into_models();

        assert_eq!(models.len(), 2);
        assert!(models[0].capabilities.is_empty());
        assert!(models[0].created_at.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-5",
            messages: vec![Message {
                role: "user",
                content: "What is entropy?",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "openai/gpt-5",
                "messages": [{"role": "user", "content": "What is entropy?"}]
            })
        );
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config =
            Config::from_sources(crate::config::file::SkillConfigFile::default(), |_| None);
        let client = OpenRouterClient::new(&config).unwrap();

        assert!(matches!(client.bearer(), Err(Error::Config(_))));
    }
}

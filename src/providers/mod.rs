//! Remote LLM provider seams
//!
//! The skill talks to the model-listing and chat-completion APIs only through
//! [`ModelCatalog`] and [`ChatBackend`], so the resolver and the completion
//! handler can be exercised without a network.

pub mod openrouter;
pub mod resolver;

use async_trait::async_trait;
use serde::Deserialize;

use crate::Result;

pub use openrouter::OpenRouterClient;
pub use resolver::{CachedModel, ModelResolver};

/// One entry from the model-listing API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelListing {
    pub id: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ModelListing {
    /// Whether the model advertises a capability (e.g. "chat")
    #[must_use]
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Lists the models available from a provider
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Fetch the current model listing
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when no credential is configured, or a remote
    /// error when the listing cannot be fetched or decoded.
    async fn list_models(&self) -> Result<Vec<ModelListing>>;
}

/// Sends a single-turn chat completion
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask `model` to answer `prompt`, returning the first choice's text
    ///
    /// # Errors
    ///
    /// Returns `Error::RemoteStatus` for non-success statuses (the body is
    /// preserved for classification), `Error::Http` for transport failures
    /// and `Error::InvalidResponse` for unusable payloads.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;
}

//! Resolve which remote model to use, with a single-slot TTL cache

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{ModelCatalog, ModelListing};
use crate::clock::Clock;
use crate::config::ModelConfig;
use crate::{Error, Result};

/// Capability a model must advertise to be selected
const CHAT_CAPABILITY: &str = "chat";

/// Last successfully discovered model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedModel {
    pub id: String,
    pub resolved_at: DateTime<Utc>,
}

/// Resolve the model id with caching and constant fallback
///
/// Only live lookups that succeed are cached. A failed lookup returns the
/// fallback without touching the cache, so the next call retries.
pub struct ModelResolver {
    catalog: Arc<dyn ModelCatalog>,
    clock: Arc<dyn Clock>,
    cache: RwLock<Option<CachedModel>>,
    prefix: String,
    fallback: String,
    ttl: Duration,
}

impl ModelResolver {
    /// Create a new resolver with an empty cache
    #[must_use]
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        clock: Arc<dyn Clock>,
        config: &ModelConfig,
    ) -> Self {
        Self {
            catalog,
            clock,
            cache: RwLock::new(None),
            prefix: config.prefix.clone(),
            fallback: config.fallback.clone(),
            ttl: config.cache_ttl,
        }
    }

    /// Resolve the model id to use for a completion
    ///
    /// Never fails: any discovery error yields the fallback id.
    pub async fn resolve(&self) -> String {
        let now = self.clock.now();

        if let Some(id) = self.fresh_cached(now).await {
            return id;
        }

        match self.discover().await {
            Ok(id) => {
                tracing::debug!(model = %id, "resolved latest model");
                *self.cache.write().await = Some(CachedModel {
                    id: id.clone(),
                    resolved_at: now,
                });
                id
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = %self.fallback,
                    "model discovery failed, using fallback"
                );
                self.fallback.clone()
            }
        }
    }

    /// Current cache slot, fresh or not
    pub async fn cached(&self) -> Option<CachedModel> {
        self.cache.read().await.clone()
    }

    /// Model returned when discovery fails
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    async fn fresh_cached(&self, now: DateTime<Utc>) -> Option<String> {
        let cache = self.cache.read().await;
        let cached = cache.as_ref()?;

        let age = now.signed_duration_since(cached.resolved_at);
        // a clock that stepped backwards leaves the entry fresh
        let fresh = age.to_std().ok().is_none_or(|age| age < self.ttl);

        fresh.then(|| cached.id.clone())
    }

    async fn discover(&self) -> Result<String> {
        let models = self.catalog.list_models().await?;
        select_latest(&models, &self.prefix)
            .map(|m| m.id.clone())
            .ok_or_else(|| Error::NoCandidates {
                prefix: self.prefix.clone(),
            })
    }
}

/// Pick the newest chat model under `prefix`
///
/// `created_at` is compared as a string, absent sorts lowest. Ties keep the
/// earliest entry in listing order.
#[must_use]
pub fn select_latest<'a>(models: &'a [ModelListing], prefix: &str) -> Option<&'a ModelListing> {
    models
        .iter()
        .filter(|m| m.id.starts_with(prefix) && m.supports(CHAT_CAPABILITY))
        .fold(None, |best: Option<&ModelListing>, m| match best {
            Some(b) if created_key(m) <= created_key(b) => Some(b),
            _ => Some(m),
        })
}

fn created_key(model: &ModelListing) -> &str {
    model.created_at.as_deref().unwrap_or_default()
}

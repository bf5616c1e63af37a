//! Shared test utilities
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ask_skill::config::ModelConfig;
use ask_skill::{
    ChatBackend, Clock, Error, ModelCatalog, ModelListing, ModelResolver, Result, Skill,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

/// Clock pinned to one instant
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A fixed test instant
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Model listing entry
#[must_use]
pub fn model(id: &str, caps: &[&str], created_at: Option<&str>) -> ModelListing {
    ModelListing {
        id: id.to_string(),
        capabilities: caps.iter().map(ToString::to_string).collect(),
        created_at: created_at.map(String::from),
    }
}

/// Catalog returning a canned listing, or failing when `None`
pub struct StubCatalog {
    models: Option<Vec<ModelListing>>,
    calls: AtomicUsize,
}

impl StubCatalog {
    pub fn returning(models: Vec<ModelListing>) -> Arc<Self> {
        Arc::new(Self {
            models: Some(models),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            models: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelCatalog for StubCatalog {
    async fn list_models(&self) -> Result<Vec<ModelListing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models
            .clone()
            .ok_or_else(|| Error::Config("listing unreachable".to_string()))
    }
}

/// What the stub chat backend answers
#[derive(Clone)]
pub enum ChatReply {
    Answer(String),
    Status(u16, String),
    /// Connection-level failure before any status arrives
    Unreachable,
}

/// Chat backend that records requests and replies with a canned answer
pub struct StubChat {
    reply: ChatReply,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl StubChat {
    pub fn answering(text: &str) -> Arc<Self> {
        Self::with(ChatReply::Answer(text.to_string()))
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Self::with(ChatReply::Status(status, body.to_string()))
    }

    pub fn unreachable() -> Arc<Self> {
        Self::with(ChatReply::Unreachable)
    }

    fn with(reply: ChatReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for StubChat {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        match &self.reply {
            ChatReply::Answer(text) => Ok(text.clone()),
            ChatReply::Status(status, body) => Err(Error::RemoteStatus {
                status: *status,
                body: body.clone(),
            }),
            ChatReply::Unreachable => Err(refused_connection().await),
        }
    }
}

/// A real transport error from a connection nobody accepts
async fn refused_connection() -> Error {
    let err = reqwest::Client::new()
        .get("http://127.0.0.1:9")
        .send()
        .await
        .expect_err("nothing listens on the discard port");
    Error::Http(err)
}

/// Build a skill over stub collaborators
pub fn build_skill(catalog: Arc<StubCatalog>, chat: Arc<StubChat>, has_credential: bool) -> Skill {
    let resolver = Arc::new(ModelResolver::new(
        catalog,
        Arc::new(FixedClock(test_now())),
        &ModelConfig::default(),
    ));
    Skill::new(resolver, chat, has_credential, "Ivy")
}

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub server");
    let addr = listener.local_addr().expect("stub server has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server failed");
    });

    format!("http://{addr}")
}

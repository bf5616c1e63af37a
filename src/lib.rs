//! Ask Skill - voice assistant skill answering questions with an LLM
//!
//! A voice platform POSTs each request envelope to the skill. Launch, help and
//! stop intents get fixed speech; the ask intent forwards the user's question
//! to an OpenRouter chat model and speaks the answer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               Voice platform (HTTPS POST)           │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                    Ask Skill                         │
//! │   Router  │  Ask handler  │  Model resolver (cache)  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                OpenRouter API                        │
//! │        /v1/models   │   /v1/chat/completions         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod providers;
pub mod skill;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use providers::{
    CachedModel, ChatBackend, ModelCatalog, ModelListing, ModelResolver, OpenRouterClient,
};
pub use skill::{
    CompletionOutcome, RequestEnvelope, ResponseEnvelope, Route, Skill, VoiceResponse,
};

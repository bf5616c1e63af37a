//! The voice skill: routing and per-intent handlers
//!
//! [`Skill::handle`] turns any request envelope into a spoken response. It has
//! no error path; every failure is already speech by the time it returns.

pub mod ask;
pub mod envelope;
pub mod router;
pub mod speech;

use std::sync::Arc;

use crate::Result;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::providers::{ChatBackend, ModelResolver, OpenRouterClient};

pub use ask::CompletionOutcome;
pub use envelope::{Intent, RequestEnvelope, ResponseEnvelope};
pub use router::Route;
pub use speech::VoiceResponse;

const LAUNCH_TEXT: &str = "Hello! I'm your GPT friend, delighted to assist you today. \
     I rather enjoy thoughtful discussions on any topic you fancy. \
     What shall we explore together?";
const LAUNCH_REPROMPT: &str = "What would you like to discuss?";

const HELP_TEXT: &str = "I'm your GPT friend, and I'd be delighted to engage in thoughtful \
     discussions on any topic that interests you. Whether it's literature, science, philosophy, \
     or current events, I'm quite well-versed in a variety of subjects. Perhaps you'd like to ask \
     about 'the impact of artificial intelligence on society' or 'the most influential books in \
     history'? What piques your interest?";
const HELP_REPROMPT: &str = "What would you like to explore?";

const GOODBYE_TEXT: &str = "It's been a pleasure chatting. \
     Do come back when you'd like another enlightening conversation!";

const UNHANDLED_TEXT: &str = "I do apologise, I didn't quite catch that. \
     You can ask me about any topic you fancy.";
const UNHANDLED_REPROMPT: &str = "What would you like to discuss?";

/// Voice skill answering questions through a chat model
pub struct Skill {
    resolver: Arc<ModelResolver>,
    chat: Arc<dyn ChatBackend>,
    has_credential: bool,
    voice: String,
}

impl Skill {
    /// Create a skill from its collaborators
    #[must_use]
    pub fn new(
        resolver: Arc<ModelResolver>,
        chat: Arc<dyn ChatBackend>,
        has_credential: bool,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            chat,
            has_credential,
            voice: voice.into(),
        }
    }

    /// Wire the skill to OpenRouter using the system clock
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(OpenRouterClient::new(config)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let resolver = Arc::new(ModelResolver::new(client.clone(), clock, &config.model));

        Ok(Self::new(
            resolver,
            client,
            config.has_api_key(),
            config.speech.voice.clone(),
        ))
    }

    /// Route a request and produce its response
    pub async fn handle(&self, envelope: &RequestEnvelope) -> VoiceResponse {
        let request = &envelope.request;
        let route = Route::from_request(request);

        tracing::info!(
            request_type = %request.request_type,
            intent = ?request.intent.as_ref().map(|i| &i.name),
            request_id = ?request.request_id,
            ?route,
            "handling voice request"
        );

        match route {
            Route::Launch => VoiceResponse::speak(LAUNCH_TEXT).ask(LAUNCH_REPROMPT),
            Route::Ask => self.handle_ask(request.intent.as_ref()).await,
            Route::Help => VoiceResponse::speak(HELP_TEXT).ask(HELP_REPROMPT),
            Route::CancelOrStop => VoiceResponse::speak(GOODBYE_TEXT),
            Route::SessionEnded => VoiceResponse::empty(),
            Route::Unhandled => VoiceResponse::speak(UNHANDLED_TEXT).ask(UNHANDLED_REPROMPT),
        }
    }

    /// Model resolver shared with status reporting
    #[must_use]
    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    /// Whether an API credential is configured
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.has_credential
    }
}

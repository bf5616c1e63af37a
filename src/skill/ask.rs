//! Answering a spoken question with a chat completion

use super::Skill;
use super::envelope::Intent;
use super::speech::{VoiceResponse, voiced};
use crate::{Error, Result};

/// Slot carrying the spoken question
pub const PROMPT_SLOT: &str = "prompt";

/// Words in a 402/429 body that mean the account is out of credit
const BILLING_KEYWORDS: [&str; 4] = ["credit", "quota", "payment", "billing"];

const CONTINUE_INVITATION: &str = "Shall we explore another topic?";
const CONTINUE_REPROMPT: &str = "What else would you like to discuss?";
const DECLINE_TEXT: &str =
    "I do apologise, but I'm unable to assist at the moment. Might we continue our chat later?";
const TROUBLE_TEXT: &str =
    "I do apologise, but I'm having a bit of trouble with that. Might we try again?";
const TROUBLE_REPROMPT: &str = "What would you like to know?";
const MISSING_CONFIG_TEXT: &str = "I do apologise, but I seem to be missing my configuration. \
     Perhaps the skill administrator could assist?";

/// Result of one ask, rendered to speech exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The model answered
    Success(String),
    /// Provider refused for lack of credit or quota
    RateLimitedOrBilling,
    /// Anything else that went wrong
    TransientFailure,
    /// No API credential, nothing was attempted
    MissingConfiguration,
}

impl CompletionOutcome {
    /// Classify a failure from any step of the ask
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::RemoteStatus { status, body } if is_billing_decline(*status, body) => {
                Self::RateLimitedOrBilling
            }
            _ => Self::TransientFailure,
        }
    }

    /// Render as speech in the given voice
    #[must_use]
    pub fn render(self, voice: &str) -> VoiceResponse {
        match self {
            Self::Success(text) => {
                let answer = format!("{} {CONTINUE_INVITATION}", text.trim());
                VoiceResponse::speak_ssml(voiced(voice, &answer)).ask(CONTINUE_REPROMPT)
            }
            Self::RateLimitedOrBilling => VoiceResponse::speak_ssml(voiced(voice, DECLINE_TEXT)),
            Self::TransientFailure => {
                VoiceResponse::speak_ssml(voiced(voice, TROUBLE_TEXT)).ask(TROUBLE_REPROMPT)
            }
            Self::MissingConfiguration => {
                VoiceResponse::speak_ssml(voiced(voice, MISSING_CONFIG_TEXT))
            }
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::RateLimitedOrBilling => "declined",
            Self::TransientFailure => "failed",
            Self::MissingConfiguration => "unconfigured",
        }
    }
}

/// Whether a status/body pair means the provider declined for billing reasons
#[must_use]
pub fn is_billing_decline(status: u16, body: &str) -> bool {
    if status != 402 && status != 429 {
        return false;
    }

    let lower = body.to_lowercase();
    BILLING_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Extract the question from the ask intent
///
/// # Errors
///
/// Returns `Error::MissingSlot` when the intent or its prompt value is absent
pub fn prompt_from(intent: Option<&Intent>) -> Result<&str> {
    intent
        .and_then(|i| i.slot_value(PROMPT_SLOT))
        .ok_or_else(|| Error::MissingSlot(PROMPT_SLOT.to_string()))
}

impl Skill {
    /// Answer the ask intent; always produces a response
    pub async fn handle_ask(&self, intent: Option<&Intent>) -> VoiceResponse {
        let outcome = self.ask(intent).await;
        tracing::info!(outcome = outcome.label(), "ask completed");
        outcome.render(&self.voice)
    }

    /// Run the ask up to (not including) rendering
    pub async fn ask(&self, intent: Option<&Intent>) -> CompletionOutcome {
        let prompt = match prompt_from(intent) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "ask intent without a prompt");
                return CompletionOutcome::TransientFailure;
            }
        };

        if !self.has_credential {
            tracing::error!("OPENROUTER_API_KEY not configured");
            return CompletionOutcome::MissingConfiguration;
        }

        let model = self.resolver.resolve().await;
        tracing::debug!(model = %model, prompt_chars = prompt.len(), "requesting completion");

        match self.chat.complete(&model, prompt).await {
            Ok(text) => CompletionOutcome::Success(text),
            Err(e) => {
                let outcome = CompletionOutcome::from_error(&e);
                tracing::warn!(
                    error = %e,
                    status = ?e.remote_status(),
                    model = %model,
                    "completion failed"
                );
                outcome
            }
        }
    }
}

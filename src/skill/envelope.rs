//! Voice platform request and response envelopes (simplified)
//!
//! Only the fields the skill reads are modelled; unknown fields are ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response envelope version expected by the platform
pub const RESPONSE_VERSION: &str = "1.0";

/// Inbound request envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestEnvelope {
    pub version: Option<String>,
    pub session: Option<Session>,
    pub context: Option<Context>,
    pub request: Request,
}

/// Session metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Option<String>,
    #[serde(default)]
    pub new: bool,
    pub application: Option<Application>,
}

/// Skill the platform is invoking
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: Option<String>,
}

/// Device and platform context sent alongside every request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: Option<SystemContext>,
}

/// `context.System` block
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemContext {
    pub application: Option<Application>,
}

/// The request proper
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// e.g. "LaunchRequest", "IntentRequest", "SessionEndedRequest"
    #[serde(rename = "type")]
    pub request_type: String,
    pub request_id: Option<String>,
    pub timestamp: Option<String>,
    pub locale: Option<String>,
    pub intent: Option<Intent>,
}

/// Recognized intent
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// Named slot filled by the platform grammar
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Slot {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl Intent {
    /// Value of a filled slot, if present
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|s| s.value.as_deref())
    }
}

impl RequestEnvelope {
    /// Application id the platform addressed, from the session or the context
    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        let from_session = self.session.as_ref().and_then(|s| s.application.as_ref());
        let from_context = self
            .context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.application.as_ref());

        from_session
            .or(from_context)
            .and_then(|a| a.application_id.as_deref())
    }

    /// Build an envelope for a bare request type (no intent)
    #[must_use]
    pub fn of_type(request_type: &str) -> Self {
        Self {
            version: Some(RESPONSE_VERSION.to_string()),
            session: None,
            context: None,
            request: Request {
                request_type: request_type.to_string(),
                request_id: None,
                timestamp: None,
                locale: None,
                intent: None,
            },
        }
    }

    /// Build an `IntentRequest` envelope with the given slots
    #[must_use]
    pub fn intent(name: &str, slots: &[(&str, &str)]) -> Self {
        let mut envelope = Self::of_type("IntentRequest");
        envelope.request.intent = Some(Intent {
            name: name.to_string(),
            slots: slots
                .iter()
                .map(|(k, v)| {
                    (
                        (*k).to_string(),
                        Slot {
                            name: Some((*k).to_string()),
                            value: Some((*v).to_string()),
                        },
                    )
                })
                .collect(),
        });
        envelope
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

/// Speech, reprompt and session control
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// Speech payload, plain or SSML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

/// Speech used to re-ask the user
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

//! Spoken response building

use super::envelope::{OutputSpeech, RESPONSE_VERSION, Reprompt, ResponseBody, ResponseEnvelope};

/// What the skill says back, before it is wrapped for the platform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoiceResponse {
    speech: Option<OutputSpeech>,
    reprompt: Option<String>,
}

impl VoiceResponse {
    /// Speak plain text
    #[must_use]
    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            speech: Some(OutputSpeech::PlainText { text: text.into() }),
            reprompt: None,
        }
    }

    /// Speak SSML markup as-is
    #[must_use]
    pub fn speak_ssml(ssml: impl Into<String>) -> Self {
        Self {
            speech: Some(OutputSpeech::Ssml { ssml: ssml.into() }),
            reprompt: None,
        }
    }

    /// Keep the session open and re-ask with `reprompt`
    #[must_use]
    pub fn ask(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    /// Response with no speech at all
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Spoken text or markup
    #[must_use]
    pub fn spoken_text(&self) -> Option<&str> {
        match &self.speech {
            Some(OutputSpeech::PlainText { text }) => Some(text),
            Some(OutputSpeech::Ssml { ssml }) => Some(ssml),
            None => None,
        }
    }

    /// Reprompt text, present when the conversation continues
    #[must_use]
    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.as_deref()
    }

    /// Wrap for the platform
    #[must_use]
    pub fn into_envelope(self) -> ResponseEnvelope {
        let should_end_session = self.speech.as_ref().map(|_| self.reprompt.is_none());

        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: self.speech,
                reprompt: self.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::PlainText { text },
                }),
                should_end_session,
            },
        }
    }
}

/// Wrap text in `<speak><voice>` markup, escaping it for SSML
#[must_use]
pub fn voiced(voice: &str, text: &str) -> String {
    format!(
        "<speak><voice name=\"{}\">{}</voice></speak>",
        escape_ssml(voice),
        escape_ssml(text)
    )
}

/// Escape characters that would break SSML markup
#[must_use]
pub fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

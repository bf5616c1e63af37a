//! Intent routing

use super::envelope::Request;

/// Custom intent carrying the user's question
pub const ASK_INTENT: &str = "AskIntent";
/// Built-in help intent
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
/// Built-in cancel intent
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
/// Built-in stop intent
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Which handler a request goes to
///
/// Routes are disjoint on `(request type, intent name)`, so the order of the
/// match arms does not decide anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Launch,
    Ask,
    Help,
    CancelOrStop,
    SessionEnded,
    Unhandled,
}

impl Route {
    /// Select the route for a request
    #[must_use]
    pub fn from_request(request: &Request) -> Self {
        let intent = request.intent.as_ref().map(|i| i.name.as_str());

        match (request.request_type.as_str(), intent) {
            ("LaunchRequest", _) => Self::Launch,
            ("IntentRequest", Some(ASK_INTENT)) => Self::Ask,
            ("IntentRequest", Some(HELP_INTENT)) => Self::Help,
            ("IntentRequest", Some(CANCEL_INTENT | STOP_INTENT)) => Self::CancelOrStop,
            ("SessionEndedRequest", _) => Self::SessionEnded,
            _ => Self::Unhandled,
        }
    }
}

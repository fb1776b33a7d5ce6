//! Outgoing speech response.

/// What the skill says back.
///
/// The session stays open exactly when a reprompt is present; there is no
/// separate flag to get out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillResponse {
    speech: Option<String>,
    reprompt: Option<String>,
}

impl SkillResponse {
    /// A response with nothing to say (used for session-ended requests).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Speech only. On its own this closes the session.
    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            speech: Some(text.into()),
            reprompt: None,
        }
    }

    /// Adds a reprompt, which keeps the session open.
    pub fn ask(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    pub fn speech(&self) -> Option<&str> {
        self.speech.as_deref()
    }

    pub fn reprompt(&self) -> Option<&str> {
        self.reprompt.as_deref()
    }

    pub fn session_open(&self) -> bool {
        self.reprompt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speak_alone_closes_session() {
        let response = SkillResponse::speak("Adiós");
        assert_eq!(response.speech(), Some("Adiós"));
        assert!(response.reprompt().is_none());
        assert!(!response.session_open());
    }

    #[test]
    fn ask_keeps_session_open() {
        let response = SkillResponse::speak("Cuéntame.").ask("¿Qué te gustaría saber?");
        assert_eq!(response.reprompt(), Some("¿Qué te gustaría saber?"));
        assert!(response.session_open());
    }

    #[test]
    fn empty_response_has_nothing() {
        let response = SkillResponse::empty();
        assert!(response.speech().is_none());
        assert!(!response.session_open());
    }
}

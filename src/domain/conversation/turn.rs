//! Turn value object.
//!
//! A turn is one immutable utterance in the session history, either from the
//! user or from the assistant. Turns serialize as `{"role", "content"}`, which
//! is both the session-attribute shape and the chat-completions message shape.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Spoken by the user.
    User,
    /// Generated by the completion backend.
    Assistant,
}

impl TurnRole {
    /// Wire name used by completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// An immutable conversational turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    content: String,
}

impl Turn {
    /// Creates a turn with the given role and content.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role() {
        assert_eq!(Turn::user("hola").role(), TurnRole::User);
        assert_eq!(Turn::assistant("hola").role(), TurnRole::Assistant);
        assert!(Turn::user("hola").is_user());
        assert!(!Turn::assistant("hola").is_user());
    }

    #[test]
    fn turn_serializes_as_chat_message() {
        let json = serde_json::to_value(Turn::user("¿qué hora es?")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "¿qué hora es?"})
        );
    }

    #[test]
    fn turn_rejects_unknown_role() {
        let result = serde_json::from_str::<Turn>(r#"{"role":"system","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(TurnRole::User.as_str(), "user");
        assert_eq!(TurnRole::Assistant.as_str(), "assistant");
    }
}

//! Session-scoped conversation history.
//!
//! The platform persists this between turns of one session (in the session
//! attributes bag). Each invocation hydrates a `SessionState`, hands it to the
//! dispatcher by mutable reference, and writes it back into the response.

use serde::{Deserialize, Serialize};

use super::turn::Turn;

/// Ordered, append-only history of turns for one session.
///
/// # Invariants
///
/// - Turns are only ever appended, in arrival order.
/// - The sole removal is [`SessionState::drop_orphaned_user_turn`], which
///   takes back a user turn that never received an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState {
    turns: Vec<Turn>,
}

impl SessionState {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a history from previously persisted turns.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a user turn.
    pub fn append_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Appends an assistant turn.
    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Removes the last turn if it is a user turn with no answer yet.
    ///
    /// Returns the removed turn. Assistant turns are never removed.
    pub fn drop_orphaned_user_turn(&mut self) -> Option<Turn> {
        match self.turns.last() {
            Some(turn) if turn.is_user() => self.turns.pop(),
            _ => None,
        }
    }

    /// Forgets the whole history (session ended).
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

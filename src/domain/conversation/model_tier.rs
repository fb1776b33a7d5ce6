//! Model tier selection from the spoken question.
//!
//! A question may start with a mode keyword (for instance "avanzado") that asks
//! for the higher-capability model. The keyword is stripped before the question
//! enters the history.

use serde::{Deserialize, Serialize};

/// Capability tier of the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Basic,
    Advanced,
}

/// A question after mode-keyword handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub tier: ModelTier,
    pub text: String,
}

impl ParsedQuestion {
    /// Splits an optional leading `keyword` off `raw`.
    ///
    /// Matching is case-insensitive and only at the start of the utterance.
    /// Returns `None` when nothing is left to ask.
    pub fn parse(raw: &str, keyword: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (tier, rest) = match strip_prefix_ignore_case(trimmed, keyword) {
            Some(rest) if !keyword.is_empty() => (ModelTier::Advanced, rest),
            _ => (ModelTier::Basic, trimmed),
        };

        let text = rest.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            tier,
            text: text.to_string(),
        })
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.to_lowercase() == prefix.to_lowercase() {
        text.get(prefix.len()..)
    } else {
        None
    }
}

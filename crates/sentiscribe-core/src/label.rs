use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Human-readable sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output ids of the upstream three-class sentiment model.
///
/// This ordering is fixed by the model's training head and must not change.
const LABEL_TABLE: [(&str, SentimentLabel); 3] = [
    ("LABEL_0", SentimentLabel::Negative),
    ("LABEL_1", SentimentLabel::Neutral),
    ("LABEL_2", SentimentLabel::Positive),
];

/// Map a raw classifier label id to its [`SentimentLabel`].
///
/// # Errors
///
/// Returns [`CoreError::UnknownLabel`] for any id outside the three-entry table.
/// There is no fallback category.
pub fn normalize_label(raw: &str) -> Result<SentimentLabel, CoreError> {
    LABEL_TABLE
        .iter()
        .find(|(id, _)| *id == raw)
        .map(|&(_, label)| label)
        .ok_or_else(|| CoreError::UnknownLabel(raw.to_string()))
}

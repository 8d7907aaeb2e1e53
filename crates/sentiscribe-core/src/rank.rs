//! Score-to-rank bucketing.
//!
//! The rank encodes favorability, not raw confidence: a confident negative
//! prediction ranks `Low`, an unsure negative ranks `High`.

use serde::{Deserialize, Serialize};

use crate::label::SentimentLabel;

const HIGH_THRESHOLD: f32 = 0.7;
const MEDIUM_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Low,
    Medium,
    High,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Rank {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a classifier confidence into a [`Rank`] for the given label.
///
/// Comparisons are strict, so a score of exactly `0.7` or `0.5` lands in the
/// lower-confidence bucket. Scores are not clamped: out-of-range values
/// (and `NaN`, which compares false) fall through the same chain.
#[must_use]
pub fn score_to_rank(label: SentimentLabel, score: f32) -> Rank {
    match label {
        SentimentLabel::Positive => {
            if score > HIGH_THRESHOLD {
                Rank::High
            } else if score > MEDIUM_THRESHOLD {
                Rank::Medium
            } else {
                Rank::Low
            }
        }
        SentimentLabel::Negative => {
            if score > HIGH_THRESHOLD {
                Rank::Low
            } else if score > MEDIUM_THRESHOLD {
                Rank::Medium
            } else {
                Rank::High
            }
        }
        SentimentLabel::Neutral => Rank::NotApplicable,
    }
}

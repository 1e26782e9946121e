use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

use super::{LanguageModel, LlmError, Prompt, ResponseMode};

pub const SUBMISSION_CAP: usize = 5;

const SYSTEM_PROMPT: &str = r#"You review YouTube comments that an automatic toxicity classifier has already sorted.
You receive a JSON object with two arrays, "positive_comments" and "negative_comments".
1. Keep only the entries of "positive_comments" that are genuinely positive or neutral.
2. Keep only the entries of "negative_comments" that are genuinely negative, toxic or hateful. In every kept negative comment replace each profanity or slur with ****.
Do not add, merge, translate or reword comments beyond the replacements above.
Return a JSON object with exactly two keys, "positive_comments" and "negative_comments", each an array of strings. Example: {"positive_comments": ["great video"], "negative_comments": ["you are a ****"]}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinementOutcome {
    Skipped,
    Verified {
        positive: Vec<String>,
        negative: Vec<String>,
    },
    Fallback {
        reason: String,
    },
}

impl RefinementOutcome {
    pub fn into_lists(self) -> (Vec<String>, Vec<String>) {
        match self {
            RefinementOutcome::Verified { positive, negative } => (positive, negative),
            RefinementOutcome::Skipped | RefinementOutcome::Fallback { .. } => {
                (Vec::new(), Vec::new())
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RefinementPayload {
    positive_comments: Vec<String>,
    negative_comments: Vec<String>,
}

#[derive(Clone)]
pub struct Refiner {
    model: Arc<dyn LanguageModel>,
}

impl Refiner {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Missing credentials are the only error; anything else degrades to
    /// [`RefinementOutcome::Fallback`].
    pub async fn refine(
        &self,
        positive: &[String],
        negative: &[String],
    ) -> Result<RefinementOutcome, ConfigError> {
        if positive.is_empty() && negative.is_empty() {
            return Ok(RefinementOutcome::Skipped);
        }

        let submitted = RefinementPayload {
            positive_comments: positive.iter().take(SUBMISSION_CAP).cloned().collect(),
            negative_comments: negative.iter().take(SUBMISSION_CAP).cloned().collect(),
        };
        let user = match serde_json::to_string(&submitted) {
            Ok(user) => user,
            Err(err) => return Ok(self.fallback(err.to_string())),
        };

        let prompt = Prompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
            mode: ResponseMode::Json,
        };
        let content = match self.model.complete(prompt).await {
            Ok(content) => content,
            Err(LlmError::Config(err)) => return Err(err),
            Err(err) => return Ok(self.fallback(err.to_string())),
        };

        let outcome = parse_refinement(
            &content,
            submitted.positive_comments.len(),
            submitted.negative_comments.len(),
        );
        match outcome {
            RefinementOutcome::Fallback { reason } => Ok(self.fallback(reason)),
            outcome => {
                tracing::debug!(target: "refiner", "refinement applied");
                Ok(outcome)
            }
        }
    }

    fn fallback(&self, reason: String) -> RefinementOutcome {
        tracing::warn!(
            target: "refiner",
            reason = %reason,
            "refinement failed; returning empty comment lists"
        );
        RefinementOutcome::Fallback { reason }
    }
}

pub fn parse_refinement(
    content: &str,
    max_positive: usize,
    max_negative: usize,
) -> RefinementOutcome {
    match serde_json::from_str::<RefinementPayload>(content.trim()) {
        Ok(mut payload) => {
            payload.positive_comments.truncate(max_positive);
            payload.negative_comments.truncate(max_negative);
            RefinementOutcome::Verified {
                positive: payload.positive_comments,
                negative: payload.negative_comments,
            }
        }
        Err(err) => RefinementOutcome::Fallback {
            reason: format!("malformed refinement payload: {err}"),
        },
    }
}

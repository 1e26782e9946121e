pub mod endpoint;
pub mod normalize;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    config::ClassifierConfig,
    domain::{ClassificationResult, LabelSet, LABELS},
};

pub use endpoint::InferenceEndpointModel;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("classifier endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("classifier returned unknown label {0:?}")]
    UnknownLabel(String),
    #[error("classifier returned {got} scores, expected {expected}")]
    MissingScores { expected: usize, got: usize },
}

/// Pretrained multi-label model. Returns one probability in `[0, 1]` per
/// entry of [`LABELS`], in vocabulary order.
#[async_trait]
pub trait ToxicityModel: Send + Sync {
    async fn label_probabilities(&self, text: &str) -> Result<Vec<f32>, ModelError>;
}

#[derive(Clone)]
pub struct CommentClassifier {
    model: Arc<dyn ToxicityModel>,
    threshold: f32,
    max_tokens: usize,
}

impl CommentClassifier {
    pub fn new(model: Arc<dyn ToxicityModel>, config: &ClassifierConfig) -> Self {
        Self {
            model,
            threshold: config.threshold,
            max_tokens: config.max_tokens,
        }
    }

    pub async fn classify(&self, comment: &str) -> Result<ClassificationResult, ModelError> {
        let cleaned = normalize::normalize(comment);
        let input = normalize::truncate_tokens(&cleaned, self.max_tokens);
        let probabilities = self.model.label_probabilities(input).await?;
        let labels = triggered_labels(&probabilities, self.threshold)?;
        let result = ClassificationResult::new(comment, labels);
        tracing::trace!(target: "classifier", labels = ?result.labels(), "comment classified");
        Ok(result)
    }

    pub async fn classify_all(
        &self,
        comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ModelError> {
        let mut results = Vec::with_capacity(comments.len());
        for comment in comments {
            results.push(self.classify(comment).await?);
        }
        tracing::debug!(target: "classifier", total = results.len(), "comments classified");
        Ok(results)
    }
}

fn triggered_labels(probabilities: &[f32], threshold: f32) -> Result<LabelSet, ModelError> {
    if probabilities.len() != LABELS.len() {
        return Err(ModelError::MissingScores {
            expected: LABELS.len(),
            got: probabilities.len(),
        });
    }
    Ok(LABELS
        .iter()
        .zip(probabilities)
        .filter(|(_, p)| **p >= threshold)
        .map(|(label, _)| *label)
        .collect())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    pub struct FixedModel {
        scores: HashMap<String, Vec<f32>>,
    }

    impl FixedModel {
        pub fn with(mut self, text: &str, labels: &[&str]) -> Self {
            let scores = LABELS
                .iter()
                .map(|l| if labels.contains(l) { 0.9 } else { 0.1 })
                .collect();
            self.scores.insert(text.to_string(), scores);
            self
        }

        pub fn with_scores(mut self, text: &str, scores: Vec<f32>) -> Self {
            self.scores.insert(text.to_string(), scores);
            self
        }
    }

    #[async_trait]
    impl ToxicityModel for FixedModel {
        async fn label_probabilities(&self, text: &str) -> Result<Vec<f32>, ModelError> {
            Ok(self
                .scores
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![0.0; LABELS.len()]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::FixedModel, *};
    use crate::domain::Verdict;

    fn classifier(model: FixedModel, threshold: f32, max_tokens: usize) -> CommentClassifier {
        CommentClassifier::new(
            Arc::new(model),
            &ClassifierConfig {
                endpoint: String::new(),
                threshold,
                max_tokens,
            },
        )
    }

    #[tokio::test]
    async fn labels_trigger_at_threshold() {
        let mut scores = vec![0.0; LABELS.len()];
        scores[0] = 0.5;
        scores[2] = 0.49;
        scores[4] = 0.97;
        let model = FixedModel::default().with_scores("you are bad", scores);
        let result = classifier(model, 0.5, 128)
            .classify("You are BAD!")
            .await
            .unwrap();

        assert_eq!(result.labels(), &["IsToxic", "IsObscene"]);
        assert_eq!(result.verdict(), Verdict::Negative);
        assert_eq!(result.comment(), "You are BAD!");
    }

    #[tokio::test]
    async fn no_labels_means_positive() {
        let result = classifier(FixedModel::default(), 0.5, 128)
            .classify("Great tutorial, thanks")
            .await
            .unwrap();
        assert!(result.labels().is_empty());
        assert_eq!(result.verdict(), Verdict::Positive);
    }

    #[tokio::test]
    async fn long_input_is_truncated_before_inference() {
        let model = FixedModel::default().with("one two three", &["IsThreat"]);
        let result = classifier(model, 0.5, 3)
            .classify("One two three four five six")
            .await
            .unwrap();
        assert_eq!(result.labels(), &["IsThreat"]);
    }

    #[tokio::test]
    async fn wrong_score_count_is_a_model_error() {
        let model = FixedModel::default().with_scores("short", vec![0.9, 0.9]);
        let err = classifier(model, 0.5, 128)
            .classify("short")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingScores { expected: 12, got: 2 }));
    }

    #[tokio::test]
    async fn classify_all_preserves_order() {
        let model = FixedModel::default().with("b", &["IsToxic"]);
        let comments = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results = classifier(model, 0.5, 128)
            .classify_all(&comments)
            .await
            .unwrap();
        let verdicts: Vec<_> = results.iter().map(|r| r.verdict()).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Positive, Verdict::Negative, Verdict::Positive]
        );
    }
}

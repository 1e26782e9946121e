use std::sync::Arc;

use super::{LanguageModel, LlmError, Prompt, ResponseMode};

const SYSTEM_PROMPT: &str = r#"You analyse the comment section of a YouTube video.
You receive comments, one per line, each prefixed with its number.
Write a short plain-text summary (at most two paragraphs) covering the overall sentiment, recurring themes, and whether the discussion contains toxic, abusive or hateful behaviour. Do not quote profanity or slurs."#;

#[derive(Clone)]
pub struct CommentAnalyst {
    model: Arc<dyn LanguageModel>,
    max_comments: usize,
}

impl CommentAnalyst {
    pub fn new(model: Arc<dyn LanguageModel>, max_comments: usize) -> Self {
        Self {
            model,
            max_comments,
        }
    }

    pub async fn analyze(&self, comments: &[String]) -> Result<String, LlmError> {
        let user = build_listing(comments, self.max_comments);
        let analysis = self
            .model
            .complete(Prompt {
                system: SYSTEM_PROMPT.to_string(),
                user,
                mode: ResponseMode::Text,
            })
            .await?;
        tracing::info!(
            target: "analysis",
            submitted = comments.len().min(self.max_comments),
            "comment analysis generated"
        );
        Ok(analysis.trim().to_string())
    }
}

fn build_listing(comments: &[String], limit: usize) -> String {
    comments
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, comment)| format!("{}. {}", i + 1, comment.replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedModel;
    use super::*;

    #[test]
    fn listing_is_numbered_and_capped() {
        let comments = vec![
            "first\nline".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];
        assert_eq!(build_listing(&comments, 2), "1. first line\n2. second");
    }

    #[tokio::test]
    async fn returns_trimmed_model_text() {
        let model = Arc::new(ScriptedModel::replying("  Mostly positive.\n"));
        let analyst = CommentAnalyst::new(model.clone(), 10);

        let analysis = analyst.analyze(&["love it".to_string()]).await.unwrap();
        assert_eq!(analysis, "Mostly positive.");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts[0].mode, ResponseMode::Text);
        assert_eq!(prompts[0].user, "1. love it");
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::LABELS;

use super::{ModelError, ToxicityModel};

/// Model served over HTTP by a Text-Embeddings-Inference compatible server.
#[derive(Clone)]
pub struct InferenceEndpointModel {
    http: Client,
    endpoint: String,
}

impl InferenceEndpointModel {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub async fn probe(&self) {
        match self.fetch_info().await {
            Ok(info) => tracing::info!(
                target: "classifier",
                endpoint = %self.endpoint,
                model = info.model_id.as_deref().unwrap_or("unknown"),
                "classifier model ready"
            ),
            Err(err) => tracing::warn!(
                target: "classifier",
                endpoint = %self.endpoint,
                error = %err,
                "classifier endpoint probe failed"
            ),
        }
    }

    async fn fetch_info(&self) -> Result<EndpointInfo, reqwest::Error> {
        self.http
            .get(format!("{}/info", self.endpoint))
            .send()
            .await?
            .error_for_status()?
            .json::<EndpointInfo>()
            .await
    }
}

#[async_trait]
impl ToxicityModel for InferenceEndpointModel {
    async fn label_probabilities(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let request = PredictRequest {
            inputs: text,
            truncate: true,
            raw_scores: true,
        };
        let response = self
            .http
            .post(format!("{}/predict", self.endpoint))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let predictions: Vec<Prediction> = response.json().await?;
        align_scores(&predictions)
    }
}

fn align_scores(predictions: &[Prediction]) -> Result<Vec<f32>, ModelError> {
    let mut scores: Vec<Option<f32>> = vec![None; LABELS.len()];
    for prediction in predictions {
        let index = label_index(&prediction.label)
            .ok_or_else(|| ModelError::UnknownLabel(prediction.label.clone()))?;
        scores[index] = Some(sigmoid(prediction.score));
    }

    let got = scores.iter().filter(|s| s.is_some()).count();
    if got != LABELS.len() {
        return Err(ModelError::MissingScores {
            expected: LABELS.len(),
            got,
        });
    }
    Ok(scores.into_iter().flatten().collect())
}

fn label_index(label: &str) -> Option<usize> {
    if let Some(index) = LABELS.iter().position(|l| l.eq_ignore_ascii_case(label)) {
        return Some(index);
    }
    label
        .strip_prefix("LABEL_")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n < LABELS.len())
}

fn sigmoid(logit: f32) -> f32 {
    1.0 / (1.0 + (-logit).exp())
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
    raw_scores: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
struct EndpointInfo {
    model_id: Option<String>,
}

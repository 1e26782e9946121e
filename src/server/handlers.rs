use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{TriageReport, TriageSummary, VideoInfo},
    triage,
    youtube::extract_video_id,
};

use super::{error::ApiError, AppContext};

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    link: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommentsResponse {
    Empty { message: &'static str },
    Report(TriageReport),
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    analysis: String,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn comments(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<LinkQuery>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let summary = triage_link(&ctx, &query.link).await?;
    Ok(Json(match summary {
        TriageSummary::NoComments => CommentsResponse::Empty {
            message: "No comments found",
        },
        TriageSummary::Ranked(report) => CommentsResponse::Report(report),
    }))
}

pub async fn video_info(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<LinkQuery>,
) -> Result<Json<VideoInfo>, ApiError> {
    let video_id = extract_video_id(&query.link)?;
    let info = ctx.comments.fetch_video_info(&video_id).await?;
    Ok(Json(info))
}

pub async fn analyze_comments(
    State(ctx): State<Arc<AppContext>>,
    Json(comments): Json<Vec<String>>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    if comments.is_empty() {
        return Err(ApiError::BadRequest("No comments provided".to_string()));
    }
    let analysis = ctx.analyst.analyze(&comments).await?;
    Ok(Json(AnalysisResponse { analysis }))
}

async fn triage_link(ctx: &AppContext, link: &str) -> Result<TriageSummary, ApiError> {
    let video_id = extract_video_id(link)?;
    let comments = ctx.comments.fetch_comments(&video_id).await?;
    let results = ctx.classifier.classify_all(&comments).await?;

    let mut summary = triage::aggregate(&results);
    if let (TriageSummary::Ranked(report), Some(refiner)) = (&mut summary, &ctx.refiner) {
        let outcome = refiner
            .refine(&report.positive_comments, &report.negative_comments)
            .await?;
        let (positive, negative) = outcome.into_lists();
        report.positive_comments = positive;
        report.negative_comments = negative;
    }

    tracing::info!(target: "http", video_id = %video_id, total = comments.len(), "comments triaged");
    Ok(summary)
}

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::{ConfigError, YouTubeConfig},
    domain::VideoInfo,
};

use super::{
    types::{Channel, CommentThreadPage, ErrorEnvelope, ListResponse, Video},
    CommentSource, YouTubeError,
};

const PAGE_SIZE: &str = "100";
const CALLER_FAULT_REASONS: &[&str] = &[
    "videoNotFound",
    "commentsDisabled",
    "channelNotFound",
    "invalidVideoId",
];

#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    pub fn new(http: Client, config: YouTubeConfig) -> Self {
        Self { http, config }
    }

    fn api_key(&self) -> Result<&str, ConfigError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ConfigError::Missing("YOUTUBE_API_KEY"))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), resource);
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<String>, YouTubeError> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut params = vec![
                ("part", "snippet,replies"),
                ("videoId", video_id),
                ("maxResults", PAGE_SIZE),
                ("textFormat", "plainText"),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let page: CommentThreadPage = self.get("commentThreads", &params).await?;
            pages += 1;
            page_token = collect_page(page, &mut comments);
            if page_token.is_none() {
                break;
            }
        }

        tracing::info!(
            target: "youtube",
            video_id,
            pages,
            comments = comments.len(),
            "comments fetched"
        );
        Ok(comments)
    }

    async fn fetch_video_info(&self, video_id: &str) -> Result<VideoInfo, YouTubeError> {
        let videos: ListResponse<Video> = self
            .get("videos", &[("part", "snippet"), ("id", video_id)])
            .await?;
        let video = videos
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YouTubeError::VideoNotFound(video_id.to_string()))?;

        let channel_id = video.snippet.channel_id.as_str();
        let channels: ListResponse<Channel> = self
            .get("channels", &[("part", "snippet"), ("id", channel_id)])
            .await?;
        let channel = channels
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YouTubeError::ChannelNotFound(channel_id.to_string()))?;

        Ok(VideoInfo {
            video_title: video.snippet.title,
            channel_name: video.snippet.channel_title,
            thumbnail_url: video.snippet.thumbnails.best(),
            channel_profile_image: channel.snippet.thumbnails.smallest(),
        })
    }
}

fn collect_page(page: CommentThreadPage, comments: &mut Vec<String>) -> Option<String> {
    for thread in page.items {
        comments.push(thread.snippet.top_level_comment.snippet.text_display);
        if let Some(replies) = thread.replies {
            comments.extend(replies.comments.into_iter().map(|c| c.snippet.text_display));
        }
    }
    page.next_page_token.filter(|token| !token.is_empty())
}

async fn check_status(response: Response) -> Result<Response, YouTubeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_error(status, &body))
}

fn classify_error(status: StatusCode, body: &str) -> YouTubeError {
    let (message, reason) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let reason = envelope
                .error
                .errors
                .into_iter()
                .next()
                .map(|detail| detail.reason)
                .unwrap_or_default();
            (envelope.error.message, reason)
        }
        Err(_) => (body.trim().to_string(), String::new()),
    };

    let caller_fault =
        status == StatusCode::NOT_FOUND || CALLER_FAULT_REASONS.contains(&reason.as_str());
    if caller_fault {
        YouTubeError::Rejected {
            status: status.as_u16(),
            reason,
            message,
        }
    } else {
        YouTubeError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

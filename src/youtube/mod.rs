pub mod client;
mod types;
pub mod url;

use async_trait::async_trait;
use thiserror::Error;

use crate::{config::ConfigError, domain::VideoInfo};

pub use client::YouTubeClient;
pub use url::extract_video_id;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Invalid YouTube URL. Could not extract video ID.")]
    InvalidUrl,
    #[error("No video found for ID {0}")]
    VideoNotFound(String),
    #[error("No channel found for ID {0}")]
    ChannelNotFound(String),
    #[error("YouTube API rejected the request ({status}, {reason}): {message}")]
    Rejected {
        status: u16,
        reason: String,
        message: String,
    },
    #[error("YouTube API error ({status}): {message}")]
    Upstream { status: u16, message: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("YouTube API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl YouTubeError {
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            YouTubeError::InvalidUrl
                | YouTubeError::VideoNotFound(_)
                | YouTubeError::ChannelNotFound(_)
                | YouTubeError::Rejected { .. }
        )
    }
}

#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<String>, YouTubeError>;

    async fn fetch_video_info(&self, video_id: &str) -> Result<VideoInfo, YouTubeError>;
}

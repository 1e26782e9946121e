use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageReport {
    pub total_comments: usize,
    pub num_positive_comments: usize,
    pub num_negative_comments: usize,
    pub positive_comments: Vec<String>,
    pub negative_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageSummary {
    NoComments,
    Ranked(TriageReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoInfo {
    pub video_title: String,
    pub channel_name: String,
    pub thumbnail_url: Option<String>,
    pub channel_profile_image: Option<String>,
}

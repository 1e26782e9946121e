pub mod comment;
pub mod types;

pub use comment::{ClassificationResult, LabelSet, Verdict, LABELS};
pub use types::{TriageReport, TriageSummary, VideoInfo};

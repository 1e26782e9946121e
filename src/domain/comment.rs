/// Fixed, ordered label vocabulary of the toxicity model. Probability `i`
/// returned by the model belongs to `LABELS[i]`.
pub const LABELS: [&str; 12] = [
    "IsToxic",
    "IsAbusive",
    "IsThreat",
    "IsProvocative",
    "IsObscene",
    "IsHatespeech",
    "IsRacist",
    "IsNationalist",
    "IsSexist",
    "IsHomophobic",
    "IsReligiousHate",
    "IsRadicalism",
];

pub type LabelSet = Vec<&'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    pub fn from_labels(labels: &[&'static str]) -> Self {
        if labels.is_empty() {
            Verdict::Positive
        } else {
            Verdict::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    comment: String,
    labels: LabelSet,
}

impl ClassificationResult {
    pub fn new(comment: impl Into<String>, labels: LabelSet) -> Self {
        Self {
            comment: comment.into(),
            labels,
        }
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_labels(&self.labels)
    }

    pub fn severity(&self) -> usize {
        self.labels.len()
    }
}

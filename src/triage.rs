use std::collections::BTreeMap;

use crate::domain::{ClassificationResult, TriageReport, TriageSummary, Verdict};

pub const POSITIVE_CAP: usize = 10;
pub const NEGATIVE_CAP: usize = 10;

/// Buckets classified comments and ranks negatives by severity.
///
/// Negatives are emitted bucket by bucket from the highest label count down.
/// A bucket is always appended whole, so the list stops growing only after
/// it has reached [`NEGATIVE_CAP`] and may overshoot it by the size of the
/// last bucket taken.
pub fn aggregate(results: &[ClassificationResult]) -> TriageSummary {
    if results.is_empty() {
        return TriageSummary::NoComments;
    }

    let mut positive_count = 0;
    let mut negative_count = 0;
    let mut positive_comments = Vec::new();
    let mut by_severity: BTreeMap<usize, Vec<&str>> = BTreeMap::new();

    for result in results {
        match result.verdict() {
            Verdict::Positive => {
                positive_count += 1;
                if positive_comments.len() < POSITIVE_CAP {
                    positive_comments.push(result.comment().to_string());
                }
            }
            Verdict::Negative => {
                negative_count += 1;
                by_severity
                    .entry(result.severity())
                    .or_default()
                    .push(result.comment());
            }
        }
    }

    let mut negative_comments = Vec::new();
    for bucket in by_severity.values().rev() {
        negative_comments.extend(bucket.iter().map(|c| c.to_string()));
        if negative_comments.len() >= NEGATIVE_CAP {
            break;
        }
    }

    tracing::debug!(
        target: "triage",
        total = results.len(),
        positive = positive_count,
        negative = negative_count,
        "comments triaged"
    );

    TriageSummary::Ranked(TriageReport {
        total_comments: results.len(),
        num_positive_comments: positive_count,
        num_negative_comments: negative_count,
        positive_comments,
        negative_comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, labels: &[&'static str]) -> ClassificationResult {
        ClassificationResult::new(text, labels.to_vec())
    }

    fn report(summary: TriageSummary) -> TriageReport {
        match summary {
            TriageSummary::Ranked(report) => report,
            TriageSummary::NoComments => panic!("expected a ranked report"),
        }
    }

    #[test]
    fn empty_input_reports_no_comments() {
        assert_eq!(aggregate(&[]), TriageSummary::NoComments);
    }

    #[test]
    fn ranks_negatives_by_label_count() {
        let results = vec![
            result("obscene one", &["IsObscene"]),
            result("lovely", &[]),
            result("toxic threat", &["IsToxic", "IsThreat"]),
        ];
        let report = report(aggregate(&results));

        assert_eq!(report.total_comments, 3);
        assert_eq!(report.num_positive_comments, 1);
        assert_eq!(report.num_negative_comments, 2);
        assert_eq!(report.positive_comments, vec!["lovely"]);
        assert_eq!(report.negative_comments, vec!["toxic threat", "obscene one"]);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let results = vec![
            result("first", &["IsToxic"]),
            result("worst", &["IsToxic", "IsRacist", "IsThreat"]),
            result("second", &["IsAbusive"]),
            result("third", &["IsSexist"]),
        ];
        let report = report(aggregate(&results));
        assert_eq!(
            report.negative_comments,
            vec!["worst", "first", "second", "third"]
        );
    }

    #[test]
    fn positives_are_capped_in_encounter_order() {
        let results: Vec<_> = (0..25).map(|i| result(&format!("good {i}"), &[])).collect();
        let report = report(aggregate(&results));

        assert_eq!(report.num_positive_comments, 25);
        assert_eq!(report.positive_comments.len(), POSITIVE_CAP);
        assert_eq!(report.positive_comments[0], "good 0");
        assert_eq!(report.positive_comments[9], "good 9");
    }

    #[test]
    fn crossing_bucket_is_included_whole() {
        let mut results: Vec<_> = (0..8)
            .map(|i| result(&format!("double {i}"), &["IsToxic", "IsThreat"]))
            .collect();
        results.extend((0..5).map(|i| result(&format!("single {i}"), &["IsToxic"])));
        results.extend((0..3).map(|i| result(&format!("clean {i}"), &[])));

        let report = report(aggregate(&results));
        assert_eq!(report.total_comments, 16);
        assert_eq!(report.num_negative_comments, 13);
        assert_eq!(
            report.num_positive_comments + report.num_negative_comments,
            report.total_comments
        );
        assert_eq!(report.negative_comments.len(), 13);
        assert_eq!(report.negative_comments[7], "double 7");
        assert_eq!(report.negative_comments[8], "single 0");
    }

    #[test]
    fn stops_after_cap_is_reached() {
        let mut results: Vec<_> = (0..10)
            .map(|i| result(&format!("triple {i}"), &["IsToxic", "IsThreat", "IsRacist"]))
            .collect();
        results.extend((0..4).map(|i| result(&format!("single {i}"), &["IsToxic"])));

        let report = report(aggregate(&results));
        assert_eq!(report.negative_comments.len(), NEGATIVE_CAP);
        assert!(report.negative_comments.iter().all(|c| c.starts_with("triple")));
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ClientError;

/// Raw envelope as sent by the evaluation service. Every field is optional
/// here; [`EvaluationResponse::from_envelope`] narrows it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EvaluationEnvelope {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) summary: Option<SummaryStats>,
    #[serde(default)]
    pub(crate) results: Option<Vec<EvaluationResult>>,
    #[serde(default)]
    pub(crate) plagiarism: Option<Vec<PlagiarismCase>>,
    #[serde(default)]
    pub(crate) report_filename: Option<String>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub(crate) struct EvaluationResponse {
    pub(crate) summary: SummaryStats,
    #[validate(nested)]
    pub(crate) results: Vec<EvaluationResult>,
    #[validate(nested)]
    pub(crate) plagiarism: Vec<PlagiarismCase>,
    pub(crate) report_filename: Option<String>,
}

/// Server-authoritative counters; never recomputed from `results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SummaryStats {
    pub(crate) total_students: u32,
    pub(crate) passed: u32,
    pub(crate) failed: u32,
    pub(crate) plagiarism_cases: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub(crate) struct EvaluationResult {
    pub(crate) student_id: String,
    #[serde(default)]
    pub(crate) filename: String,
    #[validate(range(min = 0.0, max = 1.0, message = "score must be within 0..1"))]
    pub(crate) score: f64,
    pub(crate) grade: String,
    #[serde(default)]
    #[validate(nested)]
    pub(crate) metrics: Option<ScoreMetrics>,
    #[serde(default)]
    pub(crate) feedback: Option<String>,
}

/// Per-metric sub-scores. Either one may be missing from the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub(crate) struct ScoreMetrics {
    #[serde(rename = "tfidf_score", default)]
    #[validate(range(min = 0.0, max = 1.0, message = "tfidf_score must be within 0..1"))]
    pub(crate) lexical: Option<f64>,
    #[serde(rename = "sbert_score", default)]
    #[validate(range(min = 0.0, max = 1.0, message = "sbert_score must be within 0..1"))]
    pub(crate) semantic: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub(crate) struct PlagiarismCase {
    pub(crate) student_1: String,
    pub(crate) student_2: String,
    #[validate(range(min = 0.0, max = 1.0, message = "combined_similarity must be within 0..1"))]
    pub(crate) combined_similarity: f64,
    #[serde(default)]
    pub(crate) is_plagiarism: bool,
    pub(crate) severity: Severity,
    #[serde(default)]
    pub(crate) common_phrases: Option<Vec<String>>,
}

/// Ordinal plagiarism-risk tier. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub(crate) enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Other(String),
}

impl Severity {
    pub(crate) fn is_highest_tier(&self) -> bool {
        matches!(self, Self::Critical)
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Other(label) => label,
        }
    }
}

/// Only the exact tier names are recognised; any other spelling is kept and
/// displayed verbatim.
impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Critical" => Self::Critical,
            _ => Self::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.label().to_string()
    }
}

impl EvaluationResponse {
    /// Narrow a decoded envelope into the strict shape the renderer consumes.
    ///
    /// `success = false` becomes an application error carrying the service
    /// message. A successful envelope without a summary, or with values
    /// outside `0..=1`, is treated as a malformed body.
    pub(crate) fn from_envelope(envelope: EvaluationEnvelope) -> Result<Self, ClientError> {
        if !envelope.success {
            return Err(ClientError::application(None, envelope.error));
        }

        let summary = envelope.summary.ok_or_else(|| {
            ClientError::transport("missing summary", "Malformed evaluation response")
        })?;

        let response = Self {
            summary,
            results: envelope.results.unwrap_or_default(),
            plagiarism: envelope.plagiarism.unwrap_or_default(),
            report_filename: envelope
                .report_filename
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };

        response
            .validate()
            .map_err(|err| ClientError::transport(err, "Malformed evaluation response"))?;

        Ok(response)
    }

    pub(crate) fn from_json(value: serde_json::Value) -> Result<Self, ClientError> {
        let envelope: EvaluationEnvelope = serde_json::from_value(value)
            .map_err(|err| ClientError::transport(err, "Malformed evaluation response"))?;
        Self::from_envelope(envelope)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn narrows_a_complete_envelope() {
        let response = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": 2, "passed": 1, "failed": 1, "plagiarism_cases": 0},
            "results": [
                {"student_id": "S1", "filename": "s1.pdf", "score": 0.75, "grade": "B",
                 "metrics": {"tfidf_score": 0.7, "sbert_score": 0.8}, "feedback": "Good"},
                {"student_id": "S2", "score": 0.4, "grade": "F"}
            ],
            "plagiarism": [],
            "report_filename": "evaluation_report.xlsx"
        }))
        .expect("response");

        assert_eq!(response.summary.total_students, 2);
        assert_eq!(response.results.len(), 2);
        assert_eq!(
            response.results[0].metrics,
            Some(ScoreMetrics { lexical: Some(0.7), semantic: Some(0.8) })
        );
        assert_eq!(response.results[1].filename, "");
        assert!(response.results[1].metrics.is_none());
        assert_eq!(response.report_filename.as_deref(), Some("evaluation_report.xlsx"));
    }

    #[test]
    fn null_lists_become_empty() {
        let response = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": 0, "passed": 0, "failed": 0, "plagiarism_cases": 0},
            "results": null,
            "plagiarism": null,
            "report_filename": ""
        }))
        .expect("response");

        assert!(response.results.is_empty());
        assert!(response.plagiarism.is_empty());
        assert!(response.report_filename.is_none());
    }

    #[test]
    fn success_false_is_an_application_error() {
        let err = EvaluationResponse::from_json(json!({
            "success": false,
            "error": "No text could be extracted"
        }))
        .expect_err("failure");

        assert_eq!(
            err,
            ClientError::Application {
                status: None,
                message: "No text could be extracted".to_string()
            }
        );
    }

    #[test]
    fn missing_summary_is_a_transport_error() {
        let err = EvaluationResponse::from_json(json!({"success": true, "results": []}))
            .expect_err("malformed");
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn empty_or_partial_metrics_are_accepted() {
        let response = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": 2, "passed": 1, "failed": 1, "plagiarism_cases": 0},
            "results": [
                {"student_id": "S1", "score": 0.75, "grade": "B", "metrics": {}},
                {"student_id": "S2", "score": 0.4, "grade": "F", "metrics": {"tfidf_score": 0.5}}
            ]
        }))
        .expect("response");

        assert_eq!(response.results[0].metrics, Some(ScoreMetrics::default()));
        assert_eq!(
            response.results[1].metrics,
            Some(ScoreMetrics { lexical: Some(0.5), semantic: None })
        );
    }

    #[test]
    fn out_of_range_metric_is_a_transport_error() {
        let err = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": 1, "passed": 1, "failed": 0, "plagiarism_cases": 0},
            "results": [{"student_id": "S1", "score": 0.9, "grade": "A",
                         "metrics": {"sbert_score": 1.2}}]
        }))
        .expect_err("malformed");
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn out_of_range_score_is_a_transport_error() {
        let err = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": 1, "passed": 1, "failed": 0, "plagiarism_cases": 0},
            "results": [{"student_id": "S1", "score": 1.5, "grade": "A"}]
        }))
        .expect_err("malformed");
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn wrong_field_type_is_a_transport_error() {
        let err = EvaluationResponse::from_json(json!({
            "success": true,
            "summary": {"total_students": "two", "passed": 1, "failed": 1, "plagiarism_cases": 0}
        }))
        .expect_err("malformed");
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn severity_keeps_unknown_labels() {
        let case: PlagiarismCase = serde_json::from_value(json!({
            "student_1": "S1",
            "student_2": "S2",
            "combined_similarity": 0.91,
            "is_plagiarism": true,
            "severity": "Critical"
        }))
        .expect("case");
        assert!(case.severity.is_highest_tier());
        assert_eq!(case.severity.label(), "Critical");
        assert!(case.common_phrases.is_none());

        let lowercase = Severity::from("critical".to_string());
        assert_eq!(lowercase, Severity::Other("critical".to_string()));
        assert!(!lowercase.is_highest_tier());
        assert_eq!(lowercase.label(), "critical");

        let other = Severity::from("Elevated".to_string());
        assert_eq!(other, Severity::Other("Elevated".to_string()));
        assert!(!other.is_highest_tier());
        assert_eq!(other.label(), "Elevated");
    }
}

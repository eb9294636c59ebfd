//! Pure mapping from an [`EvaluationResponse`] to the report view.
//!
//! Nothing here touches the network or mutates the payload; rendering the
//! same response twice yields equal views.

use crate::core::format::format_percent;
use crate::schemas::{EvaluationResponse, EvaluationResult, PlagiarismCase, SummaryStats};
use crate::services::evaluation::DOWNLOAD_ENDPOINT;

/// Pass/fail cut, independent of the grade the service assigns.
pub(crate) const PASS_THRESHOLD: f64 = 0.6;
pub(crate) const FEEDBACK_PLACEHOLDER: &str = "No feedback available";
const METRIC_PLACEHOLDER: &str = "N/A";
const MAX_SHARED_PHRASES: usize = 3;
const REPORT_NOTE: &str =
    "Report includes detailed metrics, analytics, and personalized feedback for each student.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Info,
    Pass,
    Fail,
    Warning,
}

impl Tone {
    pub(crate) fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatCard {
    pub(crate) value: u32,
    pub(crate) label: &'static str,
    pub(crate) tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PassStatus {
    Pass,
    Fail,
}

impl PassStatus {
    pub(crate) fn from_score(score: f64) -> Self {
        if score >= PASS_THRESHOLD {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Pass => "✓ Pass",
            Self::Fail => "✗ Fail",
        }
    }

    pub(crate) fn tone(self) -> Tone {
        match self {
            Self::Pass => Tone::Pass,
            Self::Fail => Tone::Fail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResultRow {
    pub(crate) student_id: String,
    pub(crate) filename: String,
    pub(crate) score: String,
    pub(crate) metrics: Option<String>,
    pub(crate) grade: String,
    pub(crate) grade_class: String,
    pub(crate) status: PassStatus,
    pub(crate) feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlagiarismBlock {
    pub(crate) pair: String,
    pub(crate) similarity: String,
    pub(crate) severity: String,
    pub(crate) critical: bool,
    pub(crate) shared_phrases: Option<String>,
}

/// The three mutually exclusive plagiarism render modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlagiarismSection {
    /// No pairs were compared at all.
    Clear,
    /// Pairs exist but none is flagged.
    BelowThreshold { max_similarity: String },
    /// Only flagged pairs are listed.
    Flagged { cases: Vec<PlagiarismBlock> },
}

impl PlagiarismSection {
    pub(crate) fn heading(&self) -> &'static str {
        match self {
            Self::Clear => "Plagiarism Detection",
            Self::BelowThreshold { .. } | Self::Flagged { .. } => "Plagiarism Detection Results",
        }
    }

    pub(crate) fn banner(&self) -> String {
        match self {
            Self::Clear => {
                "No plagiarism detected. All submissions appear to be original.".to_string()
            }
            Self::BelowThreshold { max_similarity } => {
                format!("No significant plagiarism detected. Maximum similarity: {max_similarity}")
            }
            Self::Flagged { cases } => {
                format!("{} potential plagiarism case(s) detected!", cases.len())
            }
        }
    }

    pub(crate) fn tone(&self) -> Tone {
        match self {
            Self::Clear | Self::BelowThreshold { .. } => Tone::Pass,
            Self::Flagged { .. } => Tone::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadLink {
    pub(crate) filename: String,
    pub(crate) href: String,
    pub(crate) label: &'static str,
    pub(crate) note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportView {
    pub(crate) summary: Vec<StatCard>,
    pub(crate) rows: Vec<ResultRow>,
    pub(crate) plagiarism: PlagiarismSection,
    pub(crate) download: Option<DownloadLink>,
}

pub(crate) fn render(response: &EvaluationResponse) -> ReportView {
    ReportView {
        summary: summary_cards(&response.summary),
        rows: result_rows(&response.results),
        plagiarism: plagiarism_section(&response.plagiarism),
        download: download_link(response.report_filename.as_deref()),
    }
}

pub(crate) fn summary_cards(summary: &SummaryStats) -> Vec<StatCard> {
    let plagiarism_tone = if summary.plagiarism_cases > 0 { Tone::Warning } else { Tone::Pass };

    vec![
        StatCard { value: summary.total_students, label: "Total Students", tone: Tone::Info },
        StatCard { value: summary.passed, label: "Passed", tone: Tone::Pass },
        StatCard { value: summary.failed, label: "Failed", tone: Tone::Fail },
        StatCard {
            value: summary.plagiarism_cases,
            label: "Plagiarism Cases",
            tone: plagiarism_tone,
        },
    ]
}

/// One row per result, in the order the service sent them.
pub(crate) fn result_rows(results: &[EvaluationResult]) -> Vec<ResultRow> {
    results.iter().map(result_row).collect()
}

fn result_row(result: &EvaluationResult) -> ResultRow {
    let metrics = result
        .metrics
        .filter(|metrics| metrics.lexical.is_some() || metrics.semantic.is_some())
        .map(|metrics| {
            format!(
                "TF-IDF: {} | SBERT: {}",
                metric_percent(metrics.lexical),
                metric_percent(metrics.semantic)
            )
        });

    let feedback = result
        .feedback
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(FEEDBACK_PLACEHOLDER)
        .to_string();

    ResultRow {
        student_id: result.student_id.clone(),
        filename: result.filename.clone(),
        score: format_percent(result.score, 1),
        metrics,
        grade: result.grade.clone(),
        grade_class: format!("grade-{}", result.grade),
        status: PassStatus::from_score(result.score),
        feedback,
    }
}

fn metric_percent(value: Option<f64>) -> String {
    value.map(|value| format_percent(value, 0)).unwrap_or_else(|| METRIC_PLACEHOLDER.to_string())
}

pub(crate) fn plagiarism_section(cases: &[PlagiarismCase]) -> PlagiarismSection {
    if cases.is_empty() {
        return PlagiarismSection::Clear;
    }

    let flagged: Vec<PlagiarismBlock> =
        cases.iter().filter(|case| case.is_plagiarism).map(plagiarism_block).collect();

    if flagged.is_empty() {
        let max = cases.iter().map(|case| case.combined_similarity).fold(0.0_f64, f64::max);
        return PlagiarismSection::BelowThreshold { max_similarity: format_percent(max, 1) };
    }

    PlagiarismSection::Flagged { cases: flagged }
}

fn plagiarism_block(case: &PlagiarismCase) -> PlagiarismBlock {
    let shared_phrases = case
        .common_phrases
        .as_ref()
        .filter(|phrases| !phrases.is_empty())
        .map(|phrases| {
            let shown: Vec<&str> =
                phrases.iter().take(MAX_SHARED_PHRASES).map(String::as_str).collect();
            shown.join(", ")
        });

    PlagiarismBlock {
        pair: format!("{} vs {}", case.student_1, case.student_2),
        similarity: format_percent(case.combined_similarity, 1),
        severity: format!("{} Risk", case.severity.label()),
        critical: case.severity.is_highest_tier(),
        shared_phrases,
    }
}

pub(crate) fn download_link(filename: Option<&str>) -> Option<DownloadLink> {
    let filename = filename.map(str::trim).filter(|name| !name.is_empty())?;

    Some(DownloadLink {
        filename: filename.to_string(),
        href: format!("/{DOWNLOAD_ENDPOINT}/{filename}"),
        label: "Download Excel Report",
        note: REPORT_NOTE,
    })
}

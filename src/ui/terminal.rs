use std::fmt::Write;

use super::render::{PlagiarismSection, ReportView};
use super::view::ViewContext;
use crate::core::config::ServiceUrl;
use crate::selection::InputSlot;
use crate::services::evaluation::DOWNLOAD_ENDPOINT;

/// Plain-text rendering of the view for the command line.
pub(crate) fn render_text(view: &ViewContext, service: &ServiceUrl) -> String {
    let mut out = String::new();

    for (slot, label) in [(InputSlot::Reference, "Question file"), (InputSlot::Students, "Answers")]
    {
        if let Some(info) = view.file_info(slot) {
            let _ = writeln!(out, "{label}: {info}");
        }
    }

    if let Some(notification) = view.notifications().current() {
        let _ = writeln!(out, "[{}] {}", notification.kind.css_class(), notification.message);
    }

    if let Some(report) = view.report() {
        write_report(&mut out, report, service);
    }

    out
}

fn write_report(out: &mut String, report: &ReportView, service: &ServiceUrl) {
    let _ = writeln!(out, "\nSummary");
    for card in &report.summary {
        let tone = card.tone.css_class();
        let _ = writeln!(out, "  {:<18} {:>5}  ({tone})", card.label, card.value);
    }

    let _ = writeln!(out, "\nResults");
    for row in &report.rows {
        let _ = writeln!(
            out,
            "  {} [{}]  {}  grade {}  {} ({})",
            row.student_id,
            row.filename,
            row.score,
            row.grade,
            row.status.label(),
            row.status.tone().css_class()
        );
        if let Some(metrics) = &row.metrics {
            let _ = writeln!(out, "    {metrics}");
        }
        let _ = writeln!(out, "    {}", row.feedback);
    }

    let _ = writeln!(out, "\n{}", report.plagiarism.heading());
    let plagiarism = &report.plagiarism;
    let _ = writeln!(out, "  [{}] {}", plagiarism.tone().css_class(), plagiarism.banner());
    if let PlagiarismSection::Flagged { cases } = &report.plagiarism {
        for case in cases {
            let marker = if case.critical { "!!" } else { "-" };
            let _ = writeln!(
                out,
                "  {marker} {}  Similarity: {}  {}",
                case.pair, case.similarity, case.severity
            );
            if let Some(phrases) = &case.shared_phrases {
                let _ = writeln!(out, "     Common phrases: {phrases}");
            }
        }
    }

    if let Some(link) = &report.download {
        let url = service.endpoint(&[DOWNLOAD_ENDPOINT, link.filename.as_str()]);
        let _ = writeln!(out, "\n{}: {url}", link.label);
        let _ = writeln!(out, "  {}", link.note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::evaluation::Severity;
    use crate::test_support::{case, sample_response};
    use crate::ui::render::render;

    #[test]
    fn prints_notification_results_and_absolute_download_link() {
        let mut response = sample_response();
        response.plagiarism = vec![case("S1", "S2", 0.95, true, Severity::Critical)];
        response.report_filename = Some("report 1.xlsx".to_string());

        let mut view = ViewContext::default();
        view.set_file_info(InputSlot::Reference, Some("q.pdf (1 KB)".to_string()));
        view.show_report(render(&response));
        view.notifications_mut().success("Evaluation completed successfully!");

        let service = ServiceUrl::parse("http://grader.local:5000").expect("url");
        let text = render_text(&view, &service);

        assert!(text.contains("Question file: q.pdf (1 KB)"));
        assert!(text.contains("[alert-success] Evaluation completed successfully!"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("✗ Fail"));
        assert!(text.contains("✗ Fail (fail)"));
        assert!(text.contains("[warning] 1 potential plagiarism case(s) detected!"));
        assert!(text.contains("!! S1 vs S2  Similarity: 95.0%  Critical Risk"));
        assert!(text.contains("http://grader.local:5000/download-report/report%201.xlsx"));
    }

    #[test]
    fn clean_report_prints_pass_banner() {
        let mut view = ViewContext::default();
        view.show_report(render(&sample_response()));

        let service = ServiceUrl::parse("http://localhost:5000").expect("url");
        let text = render_text(&view, &service);

        assert!(text.contains("✓ Pass (pass)"));
        assert!(text.contains(
            "[pass] No plagiarism detected. All submissions appear to be original."
        ));
    }

    #[test]
    fn empty_view_prints_nothing() {
        let service = ServiceUrl::parse("http://localhost:5000").expect("url");
        assert!(render_text(&ViewContext::default(), &service).is_empty());
    }
}

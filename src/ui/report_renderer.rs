use std::fmt::Write;
use terminal_size::{terminal_size, Width};
use crate::config::constants::{SCORE_FAIR_THRESHOLD, SCORE_GOOD_THRESHOLD};
use crate::enums::complexity::Complexity;
use crate::enums::severity::Severity;
use crate::errors::analysis_error::AnalysisError;
use crate::services::error_classifier::ErrorClassifier;
use crate::structs::analysis_result::AnalysisResult;

const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const BLUE: &str = "34";

const DEFAULT_WIDTH: usize = 80;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 50;

/// Read-only terminal rendering of a report. Shows the fields verbatim.
pub struct ReportRenderer {
    width: usize,
    color: bool,
}

impl ReportRenderer {
    pub fn new(width: usize, color: bool) -> Self {
        Self { width, color }
    }

    pub fn for_terminal() -> Self {
        let width = terminal_size()
            .map(|(Width(w), _)| usize::from(w))
            .unwrap_or(DEFAULT_WIDTH);
        Self::new(width, true)
    }

    pub fn render(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();
        let rule = "━".repeat(self.width.clamp(20, 60));

        let _ = writeln!(out, "🔍 CODE REVIEW REPORT");
        let _ = writeln!(out, "{}", rule);

        let score = result.quality_score();
        let _ = writeln!(out, "📊 Code Quality Score: {}", self.paint(&format!("{}/100", score), score_color(score)));
        let _ = writeln!(out, "   {}", self.score_bar(score));

        let complexity = result.complexity();
        let _ = writeln!(
            out,
            "🧩 Complexity: {}",
            self.paint(&complexity.as_str().to_uppercase(), complexity_color(complexity))
        );

        let _ = writeln!(out, "\n⚠️ ISSUES FOUND ({}):", result.issues().len());
        if result.issues().is_empty() {
            let _ = writeln!(out, "  ✅ No issues reported");
        }
        for issue in result.issues() {
            let badge = self.paint(&format!("[{}]", issue.severity().as_str().to_uppercase()), severity_color(issue.severity()));
            let _ = writeln!(out, "  {} {}", badge, issue.issue());
            if let Some(line) = issue.line() {
                let _ = writeln!(out, "      📍 Location: {}", line);
            }
        }

        self.render_list(&mut out, "💡 SUGGESTIONS", result.suggestions());
        self.render_list(&mut out, "📘 BEST PRACTICES", result.best_practices());
        self.render_list(&mut out, "🔒 SECURITY CONCERNS", result.security_concerns());

        let _ = writeln!(out, "{}", rule);
        out
    }

    fn render_list(&self, out: &mut String, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        let _ = writeln!(out, "\n{}:", title);
        for item in items {
            let _ = writeln!(out, "  • {}", item);
        }
    }

    pub fn render_failure(&self, error: &AnalysisError) -> String {
        let kind = ErrorClassifier::classify(error);
        let mut out = format!("❌ {}\n", self.paint(ErrorClassifier::user_notice(kind), RED));
        let _ = writeln!(out, "   [{}] {}", kind.name(), error);
        if ErrorClassifier::retryable_by_user(kind) {
            let _ = writeln!(out, "🔄 You can retry the analysis");
        }
        out
    }

    pub fn render_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(result)
    }

    fn score_bar(&self, score: u8) -> String {
        let bar_width = self.width.saturating_sub(20).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let filled = usize::from(score) * bar_width / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_width - filled));
        format!("[{}] {}%", self.paint(&bar, score_color(score)), score)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

fn score_color(score: u8) -> &'static str {
    if score >= SCORE_GOOD_THRESHOLD {
        GREEN
    } else if score >= SCORE_FAIR_THRESHOLD {
        YELLOW
    } else {
        RED
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => RED,
        Severity::Medium => YELLOW,
        Severity::Low => BLUE,
    }
}

fn complexity_color(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::High => RED,
        Complexity::Medium => YELLOW,
        Complexity::Low => GREEN,
    }
}

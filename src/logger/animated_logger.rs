use std::io::Write;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::config::constants::{sleep_duration_millis, SPINNER_FRAME_INTERVAL_MS};
use crate::services::error_classifier::ErrorClassifier;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::ui::review_session::{SessionError, SubmitError};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress line on stderr for the one outstanding analysis. The line names
/// the snippet under review while waiting and is replaced by a summary of the
/// outcome.
pub struct AnimatedLogger {
    message: String,
    started_at: Option<Instant>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn for_request(request: &AnalysisRequest) -> Self {
        Self {
            message: waiting_line(request),
            started_at: None,
            stop_sender: None,
            task_handle: None,
        }
    }

    pub fn start(&mut self) {
        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let message = self.message.clone();
        let started_at = Instant::now();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(sleep_duration_millis(SPINNER_FRAME_INTERVAL_MS));

            for frame in FRAMES.iter().cycle() {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ({}s) ", message, frame, started_at.elapsed().as_secs());
                        let _ = std::io::stderr().flush();
                    }
                    _ = stop_rx.recv() => break,
                }
            }
        });

        self.started_at = Some(started_at);
        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    /// Stops the spinner and prints one summary line for the outcome.
    pub async fn finish(&mut self, outcome: &Result<AnalysisResult, SubmitError>) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }
        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }

        let elapsed = self.started_at.map(|start| start.elapsed()).unwrap_or_default();
        let line = match outcome {
            Ok(result) => format!("✅ {}", success_line(result, elapsed)),
            Err(error) => format!("❌ {}", failure_line(error)),
        };

        eprint!("\r\x1b[K{}\n", line);
        let _ = std::io::stderr().flush();
    }
}

fn waiting_line(request: &AnalysisRequest) -> String {
    let lines = request.source_code().lines().count();
    format!(
        "🔍 Reviewing {} line{} of {}",
        lines,
        if lines == 1 { "" } else { "s" },
        request.language().display_name()
    )
}

fn success_line(result: &AnalysisResult, elapsed: Duration) -> String {
    format!(
        "Scored {}/100 with {} issue{} in {:.1}s",
        result.quality_score(),
        result.issues().len(),
        if result.issues().len() == 1 { "" } else { "s" },
        elapsed.as_secs_f64()
    )
}

fn failure_line(error: &SubmitError) -> String {
    match error {
        SubmitError::Analysis(error) => {
            let kind = ErrorClassifier::classify(error);
            format!("{} [{}]", ErrorClassifier::user_notice(kind), kind.name())
        }
        SubmitError::Session(SessionError::AlreadyInFlight) => "Another analysis is already running".to_string(),
        SubmitError::Session(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::language::Language;
    use crate::errors::analysis_error::AnalysisError;
    use crate::services::response_validator::ResponseValidator;

    #[test]
    fn waiting_line_names_snippet() {
        let request = AnalysisRequest::new("int main() {\n  return 0;\n}", Language::Cpp);
        assert_eq!(waiting_line(&request), "🔍 Reviewing 3 lines of C++");

        let single = AnalysisRequest::new("x = 1", Language::Python);
        assert_eq!(waiting_line(&single), "🔍 Reviewing 1 line of Python");
    }

    #[test]
    fn success_line_summarizes_report() {
        let result = ResponseValidator::parse(
            r#"{"quality_score":64,"complexity":"low","issues":[{"severity":"low","issue":"naming"}]}"#,
        )
        .unwrap();
        assert_eq!(
            success_line(&result, Duration::from_millis(2500)),
            "Scored 64/100 with 1 issue in 2.5s"
        );
    }

    #[test]
    fn failure_line_uses_classified_notice() {
        let error = SubmitError::Analysis(AnalysisError::malformed("oops", "expected value"));
        assert_eq!(
            failure_line(&error),
            "Analysis failed: the model reply could not be read. [MALFORMED_JSON]"
        );
        assert_eq!(
            failure_line(&SubmitError::Session(SessionError::AlreadyInFlight)),
            "Another analysis is already running"
        );
    }
}

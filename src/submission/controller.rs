use std::ops::{Deref, DerefMut};
use std::time::Instant;

use super::state::{SubmissionState, Transition};
use crate::core::config::ScoringSettings;
use crate::errors::ClientError;
use crate::schemas::EvaluationResponse;
use crate::selection::validation::{self, ValidSelection};
use crate::selection::{FileSelection, SelectedFile};
use crate::ui::render;
use crate::ui::ViewContext;

pub(crate) const SUCCESS_MESSAGE: &str = "Evaluation completed successfully!";

/// Form state besides the two file inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormOptions {
    pub(crate) fields: Vec<(String, String)>,
    pub(crate) scoring: ScoringSettings,
}

/// Everything the multipart payload is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmissionRequest {
    pub(crate) reference: SelectedFile,
    pub(crate) students: Vec<SelectedFile>,
    pub(crate) fields: Vec<(String, String)>,
    pub(crate) use_openai: bool,
    pub(crate) use_vision: bool,
}

impl SubmissionRequest {
    fn new(selection: ValidSelection<'_>, form: &FormOptions) -> Self {
        Self {
            reference: selection.reference.clone(),
            students: selection.students.to_vec(),
            fields: form.fields.clone(),
            use_openai: form.scoring.use_openai,
            use_vision: form.scoring.use_vision,
        }
    }
}

/// Owns the lifecycle of at most one in-flight submission.
#[derive(Debug)]
pub(crate) struct SubmissionController {
    state: SubmissionState,
    started_at: Option<Instant>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self { state: SubmissionState::Idle, started_at: None }
    }
}

impl SubmissionController {
    #[cfg(test)]
    pub(crate) fn state(&self) -> SubmissionState {
        self.state
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.state == SubmissionState::Idle
    }

    /// Handle the submit action. Returns the request to send when validation
    /// passes; otherwise surfaces the violation and stays idle. A submit
    /// while another submission is running is ignored.
    pub(crate) fn submit(
        &mut self,
        selection: &FileSelection,
        form: &FormOptions,
        view: &mut ViewContext,
    ) -> Option<SubmissionRequest> {
        if !self.is_idle() {
            tracing::debug!(state = self.state.as_str(), "Submit ignored while busy");
            return None;
        }

        self.advance(Transition::Submit);

        let valid = match validation::validate(selection) {
            Ok(valid) => valid,
            Err(violation) => {
                tracing::info!(violation = %violation, "Submission blocked by validation");
                view.notifications_mut().error(ClientError::from(violation).user_message());
                self.advance(Transition::Rejected);
                return None;
            }
        };

        self.advance(Transition::Accepted);
        view.notifications_mut().clear();
        view.begin_loading();
        self.started_at = Some(Instant::now());

        tracing::info!(
            reference = %valid.reference.name,
            students = valid.students.len(),
            use_openai = form.scoring.use_openai,
            use_vision = form.scoring.use_vision,
            "Submitting evaluation"
        );

        Some(SubmissionRequest::new(valid, form))
    }

    /// Apply the outcome of the in-flight request. Loading is torn down on
    /// every path. Returns whether a result was rendered.
    pub(crate) fn complete(
        &mut self,
        outcome: Result<EvaluationResponse, ClientError>,
        view: &mut ViewContext,
    ) -> bool {
        if self.state != SubmissionState::Submitting {
            tracing::warn!(state = self.state.as_str(), "Submission outcome without request");
            return false;
        }

        let elapsed_ms = self
            .started_at
            .take()
            .map(|started| started.elapsed().as_millis() as u64)
            .unwrap_or_default();
        let mut view = LoadingGuard(view);

        let succeeded = match outcome {
            Ok(response) => {
                self.advance(Transition::Completed);
                view.show_report(render::render(&response));
                view.notifications_mut().success(SUCCESS_MESSAGE);
                tracing::info!(
                    students = response.results.len(),
                    plagiarism_pairs = response.plagiarism.len(),
                    elapsed_ms,
                    "Evaluation completed"
                );
                true
            }
            Err(err) => {
                self.advance(Transition::Errored);
                tracing::warn!(error = %err, elapsed_ms, "Evaluation failed");
                view.notifications_mut().error(err.user_message());
                false
            }
        };

        drop(view);
        self.advance(Transition::Settled);
        succeeded
    }

    fn advance(&mut self, transition: Transition) {
        match self.state.next(transition) {
            Ok(next) => self.state = next,
            Err(err) => tracing::error!(error = %err, "Rejected submission state transition"),
        }
    }
}

/// Restores the idle visual state when dropped, including during unwinding.
struct LoadingGuard<'a>(&'a mut ViewContext);

impl Deref for LoadingGuard<'_> {
    type Target = ViewContext;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl DerefMut for LoadingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.end_loading();
    }
}

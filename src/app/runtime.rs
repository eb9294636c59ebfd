use std::sync::Arc;

use tokio::task::JoinSet;

use super::message::{Action, Message};
use super::update::{update, AppState};
use crate::errors::ClientError;
use crate::services::{health, EvaluationService};

/// Single-threaded driver: messages are applied one at a time and effects
/// run as tasks whose results come back as messages.
pub(crate) struct EventLoop {
    state: AppState,
    service: Arc<dyn EvaluationService>,
    tasks: JoinSet<Message>,
}

impl EventLoop {
    pub(crate) fn new(state: AppState, service: Arc<dyn EvaluationService>) -> Self {
        Self { state, service, tasks: JoinSet::new() }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    pub(crate) fn into_state(self) -> AppState {
        self.state
    }

    pub(crate) fn dispatch(&mut self, message: Message) {
        if let Some(action) = update(&mut self.state, message) {
            self.spawn(action);
        }
    }

    fn spawn(&mut self, action: Action) {
        let service = Arc::clone(&self.service);
        match action {
            Action::ProbeHealth => {
                self.tasks.spawn(async move {
                    Message::HealthChecked(health::probe(service.as_ref()).await)
                });
            }
            Action::Submit(request) => {
                self.tasks.spawn(async move {
                    Message::SubmissionCompleted(service.submit(request).await)
                });
            }
        }
    }

    /// Apply effect results until no task is outstanding.
    pub(crate) async fn run_until_idle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(message) => self.dispatch(message),
                Err(err) => tracing::error!(error = %err, "Effect task failed"),
            }
        }

        // A submit task that died without reporting back leaves loading on.
        if !self.state.controller.is_idle() {
            self.dispatch(Message::SubmissionCompleted(Err(ClientError::Transport(
                "Evaluation request was interrupted".to_string(),
            ))));
        }
    }
}

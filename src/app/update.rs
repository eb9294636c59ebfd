use super::message::{Action, Message};
use crate::selection::drag_drop::DropZone;
use crate::selection::{presenter, FileSelection};
use crate::services::health;
use crate::submission::{FormOptions, SubmissionController};
use crate::ui::ViewContext;

/// Whole page state. Only [`update`] mutates it.
#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub(crate) selection: FileSelection,
    pub(crate) view: ViewContext,
    pub(crate) controller: SubmissionController,
    pub(crate) form: FormOptions,
}

impl AppState {
    pub(crate) fn new(form: FormOptions) -> Self {
        Self { form, ..Self::default() }
    }
}

pub(crate) fn update(state: &mut AppState, message: Message) -> Option<Action> {
    match message {
        Message::Started => Some(Action::ProbeHealth),

        Message::FilesSelected { slot, files } => {
            state.selection.assign(slot, files);
            presenter::present(&state.selection, &mut state.view);
            None
        }

        Message::Drag { slot, gesture } => {
            DropZone::new(slot).handle(gesture, &mut state.selection, &mut state.view);
            None
        }

        Message::Submit => state
            .controller
            .submit(&state.selection, &state.form, &mut state.view)
            .map(Action::Submit),

        Message::SubmissionCompleted(outcome) => {
            state.controller.complete(outcome, &mut state.view);
            None
        }

        Message::HealthChecked(result) => {
            health::report(result, &mut state.view);
            None
        }

        Message::DismissNotification => {
            state.view.notifications_mut().dismiss();
            None
        }
    }
}

use crate::errors::ClientError;
use crate::schemas::{EvaluationResponse, HealthResponse};
use crate::selection::drag_drop::DragGesture;
use crate::selection::{InputSlot, SelectedFile};
use crate::submission::SubmissionRequest;

/// Everything that can happen to the page: user input and effect results.
#[derive(Debug)]
pub(crate) enum Message {
    /// Page finished loading.
    Started,
    /// A file picker changed.
    FilesSelected { slot: InputSlot, files: Vec<SelectedFile> },
    /// A drag gesture over one input. Interactive hosts only.
    #[cfg_attr(not(test), allow(dead_code))]
    Drag { slot: InputSlot, gesture: DragGesture },
    Submit,
    SubmissionCompleted(Result<EvaluationResponse, ClientError>),
    HealthChecked(Result<HealthResponse, ClientError>),
    /// The notification close control. Interactive hosts only.
    #[cfg_attr(not(test), allow(dead_code))]
    DismissNotification,
}

/// Side effects requested by [`update`](super::update::update).
#[derive(Debug)]
pub(crate) enum Action {
    ProbeHealth,
    Submit(SubmissionRequest),
}

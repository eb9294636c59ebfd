use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Submit action from the form.
    Submit,
    /// Validation found a violation.
    Rejected,
    /// Validation passed; the request is about to go out.
    Accepted,
    /// The service returned a usable result.
    Completed,
    /// Transport or application failure.
    Errored,
    /// Loading state torn down.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid submission transition {transition:?} from {state:?}")]
pub(crate) struct InvalidTransition {
    pub(crate) state: SubmissionState,
    pub(crate) transition: Transition,
}

impl SubmissionState {
    pub(crate) fn next(self, transition: Transition) -> Result<Self, InvalidTransition> {
        use SubmissionState::*;
        use Transition::*;

        match (self, transition) {
            (Idle, Submit) => Ok(Validating),
            (Validating, Rejected) => Ok(Idle),
            (Validating, Accepted) => Ok(Submitting),
            (Submitting, Completed) => Ok(Succeeded),
            (Submitting, Errored) => Ok(Failed),
            (Succeeded | Failed, Settled) => Ok(Idle),
            (state, transition) => Err(InvalidTransition { state, transition }),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

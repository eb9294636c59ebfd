use thiserror::Error;

pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Evaluation failed";

/// Terminal failure of one submission attempt. Nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ClientError {
    /// Detected before any network call: missing file, wrong type, oversize.
    #[error("{0}")]
    Validation(String),
    /// The request could not be completed or the body could not be understood.
    #[error("{0}")]
    Transport(String),
    /// The service answered but reported failure.
    #[error("{message}")]
    Application { status: Option<u16>, message: String },
}

impl ClientError {
    /// Log the underlying error with context and return a `Transport` variant.
    pub(crate) fn transport(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::warn!(error = %err, "{context}");
        Self::Transport(format!("{context}: {err}"))
    }

    pub(crate) fn application(status: Option<u16>, message: Option<String>) -> Self {
        let message = message
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Self::Application { status, message }
    }

    /// Text shown in the notification slot.
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Transport(_) | Self::Application { .. } => format!("Error: {self}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub(crate) fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notification {
    pub(crate) message: String,
    pub(crate) kind: NotificationKind,
}

/// Single-slot alert surface: the latest notification wins and stays until
/// it is dismissed or replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NotificationCenter {
    current: Option<Notification>,
}

impl NotificationCenter {
    pub(crate) fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        tracing::debug!(kind = kind.css_class(), message = %message, "Notification shown");
        self.current = Some(Notification { message, kind });
    }

    pub(crate) fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error);
    }

    /// Explicit close action.
    pub(crate) fn dismiss(&mut self) {
        self.current = None;
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }

    pub(crate) fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_notification_replaces_previous() {
        let mut center = NotificationCenter::default();
        center.error("first");
        center.success("second");

        let current = center.current().expect("notification");
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Success);
    }

    #[test]
    fn dismiss_empties_the_slot() {
        let mut center = NotificationCenter::default();
        center.error("boom");
        center.dismiss();
        assert!(center.current().is_none());

        center.dismiss();
        assert!(center.current().is_none());
    }
}

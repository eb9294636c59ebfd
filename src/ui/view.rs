use super::notifications::NotificationCenter;
use super::render::ReportView;
use crate::selection::InputSlot;

#[derive(Debug, Clone, Default, PartialEq)]
struct InputView {
    info: Option<String>,
    highlighted: bool,
}

/// Owned view state of the evaluation page. Components receive it by
/// `&mut` instead of looking up shared handles, so each one can be driven
/// and inspected without a real UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ViewContext {
    reference: InputView,
    students: InputView,
    submit_enabled: bool,
    loading: bool,
    report: Option<ReportView>,
    notifications: NotificationCenter,
}

impl ViewContext {
    fn input(&self, slot: InputSlot) -> &InputView {
        match slot {
            InputSlot::Reference => &self.reference,
            InputSlot::Students => &self.students,
        }
    }

    fn input_mut(&mut self, slot: InputSlot) -> &mut InputView {
        match slot {
            InputSlot::Reference => &mut self.reference,
            InputSlot::Students => &mut self.students,
        }
    }

    pub(crate) fn file_info(&self, slot: InputSlot) -> Option<&str> {
        self.input(slot).info.as_deref()
    }

    pub(crate) fn set_file_info(&mut self, slot: InputSlot, info: Option<String>) {
        self.input_mut(slot).info = info;
    }

    #[cfg(test)]
    pub(crate) fn is_highlighted(&self, slot: InputSlot) -> bool {
        self.input(slot).highlighted
    }

    pub(crate) fn set_highlighted(&mut self, slot: InputSlot, highlighted: bool) {
        self.input_mut(slot).highlighted = highlighted;
    }

    #[cfg(test)]
    pub(crate) fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub(crate) fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    /// Loading indicator on, submit off, previous results discarded.
    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.submit_enabled = false;
        self.report = None;
    }

    pub(crate) fn end_loading(&mut self) {
        self.loading = false;
        self.submit_enabled = true;
    }

    pub(crate) fn report(&self) -> Option<&ReportView> {
        self.report.as_ref()
    }

    pub(crate) fn show_report(&mut self, report: ReportView) {
        self.report = Some(report);
    }

    pub(crate) fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }
}

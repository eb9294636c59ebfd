use super::{FileSelection, InputSlot};
use crate::core::format::format_file_size;
use crate::ui::ViewContext;

/// Reflect the current selection next to each input and gate the submit
/// control on presence only. Full validation still runs at submit time.
pub(crate) fn present(selection: &FileSelection, view: &mut ViewContext) {
    let reference_info = selection
        .reference()
        .map(|file| format!("{} ({})", file.name, format_file_size(file.size)));

    let students = selection.students();
    let students_info = (!students.is_empty()).then(|| {
        format!(
            "{} files selected ({} total)",
            students.len(),
            format_file_size(selection.total_student_bytes())
        )
    });

    view.set_file_info(InputSlot::Reference, reference_info);
    view.set_file_info(InputSlot::Students, students_info);

    let can_submit =
        selection.count(InputSlot::Reference) > 0 && selection.count(InputSlot::Students) > 0;

    // The control stays disabled while a submission is in flight.
    if !view.is_loading() {
        view.set_submit_enabled(can_submit);
    }

    tracing::debug!(
        reference = selection.count(InputSlot::Reference),
        students = students.len(),
        can_submit,
        "Selection changed"
    );
}

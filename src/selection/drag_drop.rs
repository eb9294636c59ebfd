use super::{presenter, FileSelection, InputSlot, SelectedFile};
use crate::ui::ViewContext;

/// Native drag events. Only an interactive host produces them; the CLI
/// selects files by path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) enum DragGesture {
    Enter,
    Over,
    Leave,
    Drop(Vec<SelectedFile>),
}

/// What the host should do with the native event after handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GestureOutcome {
    pub(crate) prevent_default: bool,
    pub(crate) stop_propagation: bool,
}

impl GestureOutcome {
    const SUPPRESSED: Self = Self { prevent_default: true, stop_propagation: true };
}

/// Drop target wrapping one file input's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DropZone {
    slot: InputSlot,
}

impl DropZone {
    pub(crate) fn new(slot: InputSlot) -> Self {
        Self { slot }
    }

    /// Every gesture suppresses the browser's file-open navigation. A drop
    /// replaces the input's files and goes through the same path as a
    /// manual pick; validation is left to submit time.
    pub(crate) fn handle(
        self,
        gesture: DragGesture,
        selection: &mut FileSelection,
        view: &mut ViewContext,
    ) -> GestureOutcome {
        match gesture {
            DragGesture::Enter | DragGesture::Over => view.set_highlighted(self.slot, true),
            DragGesture::Leave => view.set_highlighted(self.slot, false),
            DragGesture::Drop(files) => {
                view.set_highlighted(self.slot, false);
                tracing::debug!(slot = self.slot.as_str(), files = files.len(), "Files dropped");
                selection.assign(self.slot, files);
                presenter::present(selection, view);
            }
        }

        GestureOutcome::SUPPRESSED
    }
}

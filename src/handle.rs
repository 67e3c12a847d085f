use egui::{CursorIcon, Id, Sense, Ui};

use crate::tracker::ReorderTracker;

/// The draggable grip of a row. Constructed by [`crate::DragDropUi::ui`] and
/// handed to the row callback; wrap the part of the row that should start a
/// drag in [`Handle::ui`] (or the whole row for whole-row dragging).
pub struct Handle<'a> {
    pub(crate) tracker: &'a mut ReorderTracker,
    pub(crate) id: Id,
    pub(crate) src_index: usize,
}

impl<'a> Handle<'a> {
    pub fn ui(self, ui: &mut Ui, contents: impl FnOnce(&mut Ui)) {
        // add contents to ui
        let added_contents = ui.scope(contents);
        let response = ui.interact(
            added_contents.response.rect,
            self.id.with("reorder_handle"),
            Sense::drag(),
        );

        if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        }

        // Only one row may be dragged at a time; a second press while a drag
        // is active is ignored.
        if response.drag_started() && !self.tracker.is_dragging() {
            self.tracker.begin_drag(self.src_index, self.id);
        }
    }
}

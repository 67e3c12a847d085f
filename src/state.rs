use egui::{Id, Key, LayerId, Order, Rect, Sense, Ui, Vec2};
use std::hash::Hash;
use tracing::debug;

use crate::handle::Handle;
use crate::tracker::{ReorderMove, ReorderTracker, VisibleItem};
use crate::utils::move_item;

/// Supplies the stable key a row keeps across reorders.
pub trait DragDropItem {
    fn id(&self) -> Id;
}

impl<T: Hash> DragDropItem for T {
    fn id(&self) -> Id {
        Id::new(self)
    }
}

/// Per-frame outcome of [`DragDropUi::ui`].
///
/// `CurrentDrag` reports the move that would happen if the gesture ended
/// right now. `Completed` is returned on exactly one frame per successful
/// gesture; apply it to the backing collection with
/// [`DragDropResponse::update_vec`] or [`crate::utils::move_item`].
pub enum DragDropResponse {
    NoDrag,
    CurrentDrag(ReorderMove),
    Completed(ReorderMove),
}

impl DragDropResponse {
    pub fn completed(&self) -> Option<ReorderMove> {
        match self {
            DragDropResponse::Completed(mv) => Some(*mv),
            _ => None,
        }
    }

    /// Apply a completed reorder to `items`; no-op for the other variants.
    pub fn update_vec<T>(&self, items: &mut Vec<T>) {
        if let DragDropResponse::Completed(mv) = self {
            move_item(items, mv.from, mv.to);
        }
    }
}

/// Widget state for a drag-to-reorder list. Keep one per list across frames.
///
/// Rows are drawn in their current slot order, so neighbors slide to fill the
/// gap left by the lifted row while the backing collection stays untouched
/// until the drop.
pub struct DragDropUi {
    tracker: ReorderTracker,
    /// Rows measured during the previous frame, in slot order. Immediate
    /// mode: the current frame's geometry is only known after drawing.
    rows: Vec<VisibleItem>,
    return_time: f32,
}

impl Default for DragDropUi {
    fn default() -> Self {
        Self {
            tracker: ReorderTracker::default(),
            rows: Vec::new(),
            return_time: 0.15,
        }
    }
}

impl DragDropUi {
    /// Override the hysteresis threshold for counting a partially overlapped
    /// row as shifted. See [`crate::tracker::DEFAULT_SHIFT_THRESHOLD`].
    pub fn with_shift_threshold(mut self, threshold: f32) -> Self {
        self.tracker.set_shift_threshold(threshold);
        self
    }

    /// Override how long displaced rows take to slide into their new slot,
    /// in seconds.
    pub fn with_return_time(mut self, seconds: f32) -> Self {
        self.return_time = seconds;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Draw the list. `item_ui` is called once per row in slot order with the
    /// row's source index and a [`Handle`]; wrap the draggable part of the
    /// row ui in [`Handle::ui`].
    pub fn ui<'a, T: DragDropItem + 'a>(
        &mut self,
        ui: &mut Ui,
        items: impl Iterator<Item = &'a T>,
        mut item_ui: impl FnMut(&mut Ui, Handle<'_>, usize, &T),
    ) -> DragDropResponse {
        let items: Vec<&T> = items.collect();
        let len = items.len();

        // Feed this frame's input into the tracker before drawing, against
        // the rows measured last frame.
        if self.tracker.is_dragging() {
            let out_of_range = self
                .tracker
                .proposed_move()
                .map_or(true, |mv| mv.from >= len || mv.to >= len);
            if out_of_range {
                // The backing collection changed under the drag.
                self.tracker.cancel();
            } else if ui.input(|i| i.key_pressed(Key::Escape)) {
                self.tracker.cancel();
            } else {
                let delta = ui.input(|i| i.pointer.delta()).y;
                if delta != 0.0 {
                    self.tracker.drag_by(delta, &self.rows);
                }
            }
        }

        let mut rows = Vec::with_capacity(len);
        let dragging = self.tracker.is_dragging();
        Self::list_frame(ui, dragging, |ui| {
            let spacing = ui.spacing().item_spacing.y;
            for dest_slot in 0..len {
                let src_index = self.tracker.src_index_at(dest_slot);
                let item = items[src_index];
                let id = item.id();
                let rect = self.row_ui(ui, id, src_index, item, &mut item_ui);
                rows.push(VisibleItem {
                    id,
                    offset: rect.top(),
                    extent: rect.height() + spacing,
                });
            }
        });
        self.rows = rows;

        if self.tracker.is_dragging() {
            if ui.input(|i| i.pointer.any_released()) {
                return match self.tracker.finish() {
                    Some(mv) => {
                        debug!(from = mv.from, to = mv.to, "reorder completed");
                        DragDropResponse::Completed(mv)
                    }
                    None => DragDropResponse::NoDrag,
                };
            }
            if let Some(mv) = self.tracker.proposed_move() {
                return DragDropResponse::CurrentDrag(mv);
            }
        }
        DragDropResponse::NoDrag
    }

    /// Draw one row on its own layer and apply its visual offset.
    ///
    /// The dragged row goes on an elevated layer translated by the raw
    /// displacement remainder, so it tracks the pointer exactly. Every other
    /// row is eased toward its current slot, so a one-step shift change
    /// slides instead of popping.
    fn row_ui<T: DragDropItem>(
        &mut self,
        ui: &mut Ui,
        id: Id,
        src_index: usize,
        item: &T,
        item_ui: &mut impl FnMut(&mut Ui, Handle<'_>, usize, &T),
    ) -> Rect {
        let is_dragged = self.tracker.dragged_id() == Some(id);
        let order = if is_dragged {
            Order::Tooltip
        } else {
            Order::Middle
        };
        let layer_id = LayerId::new(order, id.with("reorder_row"));

        let tracker = &mut self.tracker;
        let inner = ui.with_layer_id(layer_id, |ui| {
            let handle = Handle {
                tracker,
                id,
                src_index,
            };
            item_ui(ui, handle, src_index, item);
        });
        let rect = inner.response.rect;

        let anim_id = id.with("reorder_row_y");
        let offset = if is_dragged {
            let offset = self.tracker.drag_offset();
            // Pin the animation clock to the dragged row's on-screen position
            // so it settles smoothly from wherever it was dropped.
            ui.ctx()
                .animate_value_with_time(anim_id, rect.top() + offset, 0.0);
            offset
        } else {
            let animated = ui
                .ctx()
                .animate_value_with_time(anim_id, rect.top(), self.return_time);
            animated - rect.top()
        };
        if offset != 0.0 {
            ui.ctx().translate_layer(layer_id, Vec2::new(0.0, offset));
        }

        rect
    }

    /// Draw the list background frame, highlighted while a drag is active.
    fn list_frame(ui: &mut Ui, active: bool, add_rows: impl FnOnce(&mut Ui)) {
        let margin = Vec2::splat(4.0);

        let outer_bounds = ui.available_rect_before_wrap();
        let inner_rect = outer_bounds.shrink2(margin);
        let background = ui.painter().add(epaint::Shape::Noop);

        let mut content_ui = ui.child_ui(inner_rect, *ui.layout());
        add_rows(&mut content_ui);
        let outer_rect = Rect::from_min_max(outer_bounds.min, content_ui.min_rect().max + margin);
        let (rect, response) = ui.allocate_at_least(outer_rect.size(), Sense::hover());

        let style = if active && response.hovered() {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };
        ui.painter().set(
            background,
            epaint::Shape::Vec(vec![
                epaint::Shape::rect_filled(rect, style.rounding, style.bg_fill),
                epaint::Shape::rect_stroke(rect, style.rounding, style.bg_stroke),
            ]),
        );
    }
}

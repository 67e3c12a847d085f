use egui::Id;
use tracing::{debug, trace};

/// Consumed-fraction cutoff for counting a partially overlapped row as
/// shifted. A plain 0.5 midpoint oscillates when the pointer sits on a row
/// boundary under floating-point noise; the extra margin biases toward the
/// previous state.
pub const DEFAULT_SHIFT_THRESHOLD: f32 = 0.55;

/// One row of the visible-layout snapshot, in on-screen order.
///
/// `extent` is the row's pitch along the main axis: its height plus whatever
/// spacing separates it from the next row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleItem {
    pub id: Id,
    pub offset: f32,
    pub extent: f32,
}

/// A reorder to apply to the backing collection: remove at `from`, reinsert
/// at `to`. See [`crate::utils::move_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderMove {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug)]
struct Selection {
    src_index: usize,
    id: Id,
}

/// Tracks a single drag-to-reorder gesture over a vertical list.
///
/// The tracker never owns or mutates the list itself. It is fed the pointer
/// displacement and a per-frame snapshot of the visible rows, and answers two
/// questions: which source row should render in a given slot right now
/// ([`Self::src_index_at`]), and which move to commit when the gesture ends
/// ([`Self::finish`]).
///
/// Displacement is consumed against neighbor extents as the pointer moves:
/// every fully crossed row bumps the signed `shift` by one and the leftover
/// remainder carries into the next event, so hovering near a row boundary
/// does not flicker between two orderings.
pub struct ReorderTracker {
    selection: Option<Selection>,
    /// Unconsumed pointer displacement, signed along the main axis.
    drag_delta: f32,
    /// Slots the dragged row has moved past (negative = toward the start).
    shift: i32,
    shift_threshold: f32,
}

impl Default for ReorderTracker {
    fn default() -> Self {
        Self {
            selection: None,
            drag_delta: 0.0,
            shift: 0,
            shift_threshold: DEFAULT_SHIFT_THRESHOLD,
        }
    }
}

impl ReorderTracker {
    /// Override the hysteresis threshold (default [`DEFAULT_SHIFT_THRESHOLD`]).
    pub fn with_shift_threshold(mut self, threshold: f32) -> Self {
        self.shift_threshold = threshold;
        self
    }

    pub fn set_shift_threshold(&mut self, threshold: f32) {
        self.shift_threshold = threshold;
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_some()
    }

    /// Stable key of the dragged row, if a drag is active.
    pub fn dragged_id(&self) -> Option<Id> {
        self.selection.map(|selection| selection.id)
    }

    /// Source index captured at drag start, if a drag is active.
    pub fn source_index(&self) -> Option<usize> {
        self.selection.map(|selection| selection.src_index)
    }

    pub fn shift(&self) -> i32 {
        self.shift
    }

    /// Visual offset of the dragged row relative to its current slot: the
    /// displacement remainder not yet consumed as whole-slot shifts.
    pub fn drag_offset(&self) -> f32 {
        self.drag_delta
    }

    /// Start a gesture on the row at `src_index` with stable key `id`.
    pub fn begin_drag(&mut self, src_index: usize, id: Id) {
        debug!(src_index, "drag started");
        self.selection = Some(Selection { src_index, id });
        self.drag_delta = 0.0;
        self.shift = 0;
    }

    /// Accumulate a pointer movement and re-derive the shift against the
    /// current visible layout.
    ///
    /// `visible` must list the rows in on-screen order, including the dragged
    /// row at its current (already shifted) slot. If the dragged row has been
    /// scrolled out of the snapshot the displacement keeps accumulating but
    /// the shift is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if no drag is active; that is a wiring bug in the caller, not a
    /// runtime condition.
    pub fn drag_by(&mut self, delta: f32, visible: &[VisibleItem]) {
        let Some(selection) = self.selection else {
            panic!("ReorderTracker::drag_by called with no active drag");
        };

        self.drag_delta += delta;
        let accumulated = self.drag_delta;
        if accumulated == 0.0 {
            return;
        }

        let Some(slot) = visible.iter().position(|row| row.id == selection.id) else {
            return;
        };

        let (steps, unconsumed) = if accumulated > 0.0 {
            // Dragging toward the end of the list.
            consume_extents(
                visible[slot + 1..].iter(),
                accumulated.abs(),
                self.shift_threshold,
            )
        } else {
            // Dragging toward the start; scan the rows above in reverse.
            consume_extents(
                visible[..slot].iter().rev(),
                accumulated.abs(),
                self.shift_threshold,
            )
        };

        let sign: i32 = if accumulated > 0.0 { 1 } else { -1 };
        self.shift += steps * sign;
        self.drag_delta = unconsumed * sign as f32;
        if steps != 0 {
            trace!(
                shift = self.shift,
                remainder = self.drag_delta,
                "shift updated"
            );
        }
    }

    /// Which source row currently occupies `dest_slot`.
    ///
    /// Identity when idle or the shift is zero. Otherwise slots strictly
    /// inside the shifted window show their neighbor one position closer to
    /// the gap, and the slot at the window's far edge shows the dragged row.
    /// For any fixed tracker state this is a bijection over the slot range.
    pub fn src_index_at(&self, dest_slot: usize) -> usize {
        let Some(selection) = self.selection else {
            return dest_slot;
        };
        let src = selection.src_index;

        if self.shift > 0 {
            let shift = self.shift as usize;
            if dest_slot < src || dest_slot > src + shift {
                dest_slot
            } else if dest_slot < src + shift {
                dest_slot + 1
            } else {
                src
            }
        } else if self.shift < 0 {
            let shift = self.shift.unsigned_abs() as usize;
            let window_start = src.saturating_sub(shift);
            if dest_slot > src || dest_slot < window_start {
                dest_slot
            } else if dest_slot > window_start {
                dest_slot - 1
            } else {
                src
            }
        } else {
            dest_slot
        }
    }

    /// The move that would be committed if the gesture ended right now.
    pub fn proposed_move(&self) -> Option<ReorderMove> {
        self.selection.map(|selection| ReorderMove {
            from: selection.src_index,
            to: apply_shift(selection.src_index, self.shift),
        })
    }

    /// End the gesture and report the move to apply, or `None` when the row
    /// landed back on its source slot.
    ///
    /// # Panics
    ///
    /// Panics if no drag is active.
    pub fn finish(&mut self) -> Option<ReorderMove> {
        let Some(selection) = self.selection.take() else {
            panic!("ReorderTracker::finish called with no active drag");
        };

        let mv = ReorderMove {
            from: selection.src_index,
            to: apply_shift(selection.src_index, self.shift),
        };
        self.shift = 0;
        self.drag_delta = 0.0;

        debug!(from = mv.from, to = mv.to, "drag finished");
        if mv.from == mv.to {
            None
        } else {
            Some(mv)
        }
    }

    /// Discard the gesture without reporting a move. Safe to call when idle.
    pub fn cancel(&mut self) {
        if self.selection.is_some() {
            debug!("drag cancelled");
        }
        self.selection = None;
        self.shift = 0;
        self.drag_delta = 0.0;
    }
}

fn apply_shift(src_index: usize, shift: i32) -> usize {
    (src_index as i64 + shift as i64).max(0) as usize
}

/// Walk `rows` in scan order, consuming `unconsumed` displacement against
/// each extent. Fully crossed rows count as one step each; the first
/// partially crossed row counts only past the `threshold` fraction, and ends
/// the scan either way. Returns the step count and the leftover displacement
/// (negative when the threshold rule overshot the row boundary).
fn consume_extents<'a>(
    rows: impl Iterator<Item = &'a VisibleItem>,
    mut unconsumed: f32,
    threshold: f32,
) -> (i32, f32) {
    let mut steps = 0;
    for row in rows {
        if row.extent < unconsumed {
            unconsumed -= row.extent;
            steps += 1;
        } else {
            let fraction = unconsumed / row.extent;
            if fraction > threshold {
                unconsumed -= row.extent;
                steps += 1;
            }
            break;
        }
    }
    (steps, unconsumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(src_index: usize) -> Id {
        Id::new(src_index)
    }

    /// Build the snapshot the UI would show for the tracker's current state:
    /// rows in slot order, each carrying its source row's extent.
    fn snapshot(tracker: &ReorderTracker, extents: &[f32]) -> Vec<VisibleItem> {
        let mut rows = Vec::with_capacity(extents.len());
        let mut offset = 0.0;
        for slot in 0..extents.len() {
            let src = tracker.src_index_at(slot);
            rows.push(VisibleItem {
                id: key(src),
                offset,
                extent: extents[src],
            });
            offset += extents[src];
        }
        rows
    }

    fn tracker_dragging(src_index: usize) -> ReorderTracker {
        let mut tracker = ReorderTracker::default();
        tracker.begin_drag(src_index, key(src_index));
        tracker
    }

    #[test]
    fn idle_mapping_is_identity() {
        let tracker = ReorderTracker::default();
        for slot in 0..8 {
            assert_eq!(tracker.src_index_at(slot), slot);
        }
    }

    #[test]
    fn mapping_is_a_bijection_for_every_reachable_shift() {
        let n = 6;
        for src in 0..n {
            for shift in -(src as i32)..=(n - 1 - src) as i32 {
                let mut tracker = tracker_dragging(src);
                tracker.shift = shift;

                let mut mapped: Vec<usize> = (0..n).map(|slot| tracker.src_index_at(slot)).collect();
                mapped.sort_unstable();
                let expected: Vec<usize> = (0..n).collect();
                assert_eq!(mapped, expected, "src {src} shift {shift}");
            }
        }
    }

    #[test]
    fn mapping_is_pure() {
        let mut tracker = tracker_dragging(2);
        tracker.shift = 2;
        for slot in 0..6 {
            assert_eq!(tracker.src_index_at(slot), tracker.src_index_at(slot));
        }
    }

    #[test]
    fn mapping_closes_the_gap_downward() {
        let mut tracker = tracker_dragging(1);
        tracker.shift = 2;
        // Slots: 0, [2, 3 close the gap], dragged at 3, rest identity.
        let mapped: Vec<usize> = (0..5).map(|slot| tracker.src_index_at(slot)).collect();
        assert_eq!(mapped, vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn mapping_closes_the_gap_upward() {
        let mut tracker = tracker_dragging(3);
        tracker.shift = -2;
        let mapped: Vec<usize> = (0..5).map(|slot| tracker.src_index_at(slot)).collect();
        assert_eq!(mapped, vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn partial_overlap_below_threshold_keeps_shift() {
        // 5 rows of extent 100, drag row 2 down by 120: the first neighbor is
        // fully crossed, the next only 20% covered.
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(120.0, &rows);

        assert_eq!(tracker.shift(), 1);
        assert_eq!(tracker.drag_offset(), 20.0);
        assert_eq!(tracker.finish(), Some(ReorderMove { from: 2, to: 3 }));
    }

    #[test]
    fn partial_overlap_past_threshold_tips_the_row() {
        // Same setup, 160: the second neighbor is 60% covered, past 0.55.
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(160.0, &rows);

        assert_eq!(tracker.shift(), 2);
        assert_eq!(tracker.drag_offset(), -40.0);
        assert_eq!(tracker.finish(), Some(ReorderMove { from: 2, to: 4 }));
    }

    #[test]
    fn upward_drag_mirrors_downward() {
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(-160.0, &rows);

        assert_eq!(tracker.shift(), -2);
        assert_eq!(tracker.drag_offset(), 40.0);
        assert_eq!(tracker.finish(), Some(ReorderMove { from: 2, to: 0 }));
    }

    #[test]
    fn shift_survives_a_small_reverse_motion() {
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(160.0, &rows);
        assert_eq!(tracker.shift(), 2);

        // The row tipped at 0.6 of its extent; backing off by less than the
        // threshold margin must not un-shift it.
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(-5.0, &rows);
        assert_eq!(tracker.shift(), 2);

        // Backing off far enough does reverse one step.
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(-20.0, &rows);
        assert_eq!(tracker.shift(), 1);
        assert_eq!(tracker.drag_offset(), 35.0);
    }

    #[test]
    fn varying_extents_consume_in_order() {
        let extents = [40.0, 80.0, 20.0, 60.0];
        let mut tracker = tracker_dragging(0);
        let rows = snapshot(&tracker, &extents);
        // 80 crosses the first neighbor fully, then covers 10/20 = 0.5 of the
        // next, under the threshold.
        tracker.drag_by(90.0, &rows);
        assert_eq!(tracker.shift(), 1);
        assert_eq!(tracker.drag_offset(), 10.0);

        // Two more pixels tip the 20-extent row (12/20 = 0.6).
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(2.0, &rows);
        assert_eq!(tracker.shift(), 2);
        assert_eq!(tracker.finish(), Some(ReorderMove { from: 0, to: 2 }));
    }

    #[test]
    fn dragged_row_missing_from_snapshot_accumulates_only() {
        let extents = [100.0; 3];
        let mut tracker = tracker_dragging(7);
        let rows = snapshot(&ReorderTracker::default(), &extents);
        tracker.drag_by(250.0, &rows);

        assert_eq!(tracker.shift(), 0);
        assert_eq!(tracker.drag_offset(), 250.0);
    }

    #[test]
    fn finish_without_movement_reports_nothing() {
        let mut tracker = tracker_dragging(3);
        assert_eq!(tracker.finish(), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn cancel_resets_to_idle() {
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(160.0, &rows);
        assert_eq!(tracker.shift(), 2);

        tracker.cancel();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.shift(), 0);
        assert_eq!(tracker.drag_offset(), 0.0);
        for slot in 0..5 {
            assert_eq!(tracker.src_index_at(slot), slot);
        }
    }

    #[test]
    fn cancel_when_idle_is_a_no_op() {
        let mut tracker = ReorderTracker::default();
        tracker.cancel();
        assert!(!tracker.is_dragging());
    }

    #[test]
    #[should_panic(expected = "no active drag")]
    fn drag_by_without_selection_panics() {
        let mut tracker = ReorderTracker::default();
        tracker.drag_by(10.0, &[]);
    }

    #[test]
    #[should_panic(expected = "no active drag")]
    fn finish_without_selection_panics() {
        let mut tracker = ReorderTracker::default();
        tracker.finish();
    }

    #[test]
    fn custom_threshold_changes_the_tipping_point() {
        let extents = [100.0; 5];
        let mut tracker = ReorderTracker::default().with_shift_threshold(0.8);
        tracker.begin_drag(2, key(2));
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(160.0, &rows);
        // 0.6 covered, under the raised threshold.
        assert_eq!(tracker.shift(), 1);
    }

    #[test]
    fn proposed_move_tracks_the_current_shift() {
        let extents = [100.0; 5];
        let mut tracker = tracker_dragging(2);
        assert_eq!(
            tracker.proposed_move(),
            Some(ReorderMove { from: 2, to: 2 })
        );
        let rows = snapshot(&tracker, &extents);
        tracker.drag_by(120.0, &rows);
        assert_eq!(
            tracker.proposed_move(),
            Some(ReorderMove { from: 2, to: 3 })
        );
    }
}

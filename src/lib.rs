//! Smooth drag-and-drop reordering for egui lists.
//!
//! Rows are picked up by a drag [`Handle`], track the pointer on an elevated
//! layer while their neighbors slide out of the way, and the final move is
//! reported once on drop. The backing collection is never touched until then.
//!
//! The reorder logic itself lives in [`ReorderTracker`], which is plain state
//! with no drawing attached: it is fed pointer displacement plus a snapshot
//! of the visible rows and answers which source row occupies which slot.
//! [`DragDropUi`] wires that tracker into an immediate-mode list widget.
//!
//! # Example
//!
//! ```no_run
//! use eframe::egui;
//! use egui_reorder::DragDropUi;
//!
//! struct DnDApp {
//!     items: Vec<String>,
//!     dnd: DragDropUi,
//! }
//!
//! impl eframe::App for DnDApp {
//!     fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
//!         egui::CentralPanel::default().show(ctx, |ui| {
//!             let response = self.dnd.ui(ui, self.items.iter(), |ui, handle, _index, item| {
//!                 ui.horizontal(|ui| {
//!                     handle.ui(ui, |ui| {
//!                         ui.label("::");
//!                     });
//!                     ui.label(item);
//!                 });
//!             });
//!             response.update_vec(&mut self.items);
//!         });
//!     }
//! }
//!
//! fn main() -> Result<(), eframe::Error> {
//!     eframe::run_native(
//!         "DnD Example",
//!         eframe::NativeOptions::default(),
//!         Box::new(|_| {
//!             Box::new(DnDApp {
//!                 dnd: DragDropUi::default(),
//!                 items: vec!["a", "b", "c"].into_iter().map(|s| s.to_string()).collect(),
//!             })
//!         }),
//!     )
//! }
//! ```

pub use handle::Handle;
pub use state::{DragDropItem, DragDropResponse, DragDropUi};
pub use tracker::{ReorderMove, ReorderTracker, VisibleItem, DEFAULT_SHIFT_THRESHOLD};

mod handle;
mod state;
mod tracker;
pub mod utils;

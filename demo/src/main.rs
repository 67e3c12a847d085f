use eframe::egui;
use egui::Color32;
use egui_reorder::DragDropUi;

const ITEM_COUNT: u32 = 20;

#[derive(Clone, Hash, PartialEq, Eq)]
struct Row {
    id: u32,
    /// Vertical padding in points; varies per row so the rows have uneven
    /// heights.
    padding: u32,
}

impl Row {
    fn color(&self) -> Color32 {
        match self.id % 3 {
            0 => Color32::LIGHT_BLUE,
            1 => Color32::LIGHT_RED,
            2 => Color32::LIGHT_GREEN,
            _ => Color32::GRAY,
        }
    }
}

struct DemoApp {
    rows: Vec<Row>,
    dnd: DragDropUi,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self {
            rows: (0..ITEM_COUNT)
                .map(|id| Row {
                    id,
                    padding: 8 + (id % 5) * 6,
                })
                .collect(),
            dnd: DragDropUi::default(),
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drag rows to reorder");
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let response = self.dnd.ui(ui, self.rows.iter(), |ui, handle, _index, row| {
                        // The whole row is the drag grip.
                        handle.ui(ui, |ui| {
                            egui::Frame::none()
                                .fill(row.color())
                                .inner_margin(egui::Margin::symmetric(8.0, row.padding as f32))
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "This is item number {}.",
                                            row.id + 1
                                        ))
                                        .color(Color32::BLACK),
                                    );
                                });
                        });
                    });
                    response.update_vec(&mut self.rows);
                });
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt::init();

    eframe::run_native(
        "egui_reorder demo",
        eframe::NativeOptions::default(),
        Box::new(|_| Box::new(DemoApp::default())),
    )
}

use eframe::egui;

use crate::app::LabelApp;

pub fn top_panel(app: &mut LabelApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let config = app.session.config();
            ui.label(format!("Images: {}", config.image_dir.display()));
            ui.label(format!("Labels: {}", config.label_dir.display()));
            ui.label(format!("Class: {}", config.class_name));

            if let Some(image) = app.session.current_image() {
                ui.separator();
                ui.label(image.file_name());
            }
            if let Some((message, _)) = &app.status_message {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, message);
            }
        });
        ui.label("Drag: draw box | S: save & next | N: next | P: previous | D: delete last | Q: quit");
    });
}

use eframe::egui;

use crate::app::LabelApp;
use crate::session::{Command, PointerEvent};
use crate::utils::FitView;

const KEYMAP: [(egui::Key, Command); 5] = [
    (egui::Key::S, Command::SaveAndNext),
    (egui::Key::N, Command::Next),
    (egui::Key::P, Command::Previous),
    (egui::Key::D, Command::Undo),
    (egui::Key::Q, Command::Quit),
];

pub fn central_panel(app: &mut LabelApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        for (key, command) in KEYMAP {
            if ui.input(|i| i.key_pressed(key)) {
                app.command(command);
                return;
            }
        }

        let (Some(texture), Some(frame)) = (&app.texture, &app.frame) else {
            return;
        };
        let view = FitView::fit(
            ui.available_rect_before_wrap(),
            frame.image.width(),
            frame.image.height(),
        );
        let response = ui.allocate_rect(view.rect, egui::Sense::drag());

        let painter = ui.painter_at(view.rect);
        painter.image(
            texture.id(),
            view.rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        for caption in &frame.captions {
            let [r, g, b, a] = caption.color.0;
            painter.text(
                view.to_screen(caption.x, caption.y),
                egui::Align2::LEFT_BOTTOM,
                &caption.text,
                egui::FontId::proportional(16.0),
                egui::Color32::from_rgba_unmultiplied(r, g, b, a),
            );
        }

        // only the latest pointer position matters; moves may be coalesced
        let Some(pos) = ui.input(|i| i.pointer.interact_pos()) else {
            return;
        };
        let point = view.to_source(pos);
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui.input(|i| i.pointer.press_origin()).unwrap_or(pos);
            app.pointer(PointerEvent::Down(view.to_source(origin)));
            app.pointer(PointerEvent::Move(point));
        } else if response.drag_stopped_by(egui::PointerButton::Primary) {
            app.pointer(PointerEvent::Up(point));
        } else if response.dragged_by(egui::PointerButton::Primary) {
            app.pointer(PointerEvent::Move(point));
        }
    });
}

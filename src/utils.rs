use eframe::egui;

use crate::models::Point;

/// Where the frame is shown inside the panel and how to map between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitView {
    pub rect: egui::Rect,
    pub scale: f32,
    pub source_size: egui::Vec2,
}

impl FitView {
    /// Scales uniformly and centers the image in `available`.
    pub fn fit(available: egui::Rect, width: u32, height: u32) -> Self {
        let source_size = egui::vec2(width as f32, height as f32);
        let scale = (available.width() / source_size.x).min(available.height() / source_size.y);
        let rect = egui::Rect::from_center_size(available.center(), source_size * scale);
        Self {
            rect,
            scale,
            source_size,
        }
    }

    /// Pointer position to source pixels, clamped to the image.
    pub fn to_source(&self, pos: egui::Pos2) -> Point {
        let local = (pos - self.rect.min) / self.scale;
        Point::new(
            local.x.round().clamp(0.0, self.source_size.x - 1.0) as i32,
            local.y.round().clamp(0.0, self.source_size.y - 1.0) as i32,
        )
    }

    pub fn to_screen(&self, x: i32, y: i32) -> egui::Pos2 {
        self.rect.min + egui::vec2(x as f32, y as f32) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_back_to_source_pixels() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 800.0));
        let view = FitView::fit(available, 400, 300);
        assert_eq!(view.scale, 2.0);
        assert_eq!(view.rect.min, egui::pos2(0.0, 100.0));

        assert_eq!(view.to_source(egui::pos2(100.0, 200.0)), Point::new(50, 50));
        assert_eq!(view.to_source(view.to_screen(150, 150)), Point::new(150, 150));
        // outside the image: clamped to the edge
        assert_eq!(view.to_source(egui::pos2(-20.0, 900.0)), Point::new(0, 299));
    }
}

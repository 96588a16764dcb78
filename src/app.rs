use eframe::egui;
use image::RgbaImage;

use crate::render::{self, Frame};
use crate::session::{Command, Outcome, PointerEvent, Session};

pub struct LabelApp {
    pub session: Session,
    /// Pixels of the current image only.
    pub source: Option<(usize, RgbaImage)>,
    pub frame: Option<Frame>,
    pub texture: Option<egui::TextureHandle>,
    pub dirty: bool,
    pub status_message: Option<(String, f32)>,
}

impl LabelApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            source: None,
            frame: None,
            texture: None,
            dirty: true,
            status_message: None,
        }
    }

    pub fn show_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), 2.0));
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        let had_draft = self.session.draft().is_some();
        self.session.handle_pointer(event);
        if had_draft || self.session.draft().is_some() {
            self.dirty = true;
        }
    }

    pub fn command(&mut self, command: Command) {
        match self.session.apply(command) {
            Ok(outcome) => {
                let message = match &outcome {
                    Outcome::Saved { path, boxes } => {
                        format!("Saved {} boxes to {}", boxes, path.display())
                    }
                    Outcome::NothingToSave => "No boxes, nothing saved".to_string(),
                    Outcome::Advanced => "Next image (not saved)".to_string(),
                    Outcome::Retreated => "Previous image".to_string(),
                    Outcome::Undone { remaining } => {
                        format!("Removed last box, {} left", remaining)
                    }
                    Outcome::NothingToUndo => "No box to remove".to_string(),
                    Outcome::Quit | Outcome::Finished => String::new(),
                };
                if !message.is_empty() {
                    self.show_status(&message);
                }
            }
            Err(e) => {
                log::error!("{:?} failed: {}", command, e);
                self.show_status(&format!("Error: {}", e));
            }
        }
        self.dirty = true;
    }

    /// Makes sure the pixels of the current image are loaded, skipping files
    /// that fail to decode. Returns false once the session has ended.
    pub fn sync_source(&mut self) -> bool {
        loop {
            let Some(image) = self.session.current_image() else {
                self.source = None;
                return false;
            };
            let index = self.session.index();
            if matches!(&self.source, Some((loaded, _)) if *loaded == index) {
                return true;
            }
            match image.decode() {
                Ok(pixels) => {
                    self.source = Some((index, pixels));
                    self.dirty = true;
                    return true;
                }
                Err(e) => {
                    log::warn!("{}", e);
                    self.show_status("Unreadable image skipped");
                    self.session.skip_unreadable();
                }
            }
        }
    }

    /// Re-renders the frame and refreshes the texture when state changed.
    pub fn refresh(&mut self, ctx: &egui::Context) {
        if !self.dirty {
            return;
        }
        let Some((_, pixels)) = &self.source else {
            return;
        };

        let frame = render::render(
            pixels,
            self.session.boxes(),
            self.session.draft(),
            self.session.index(),
            self.session.total(),
            &self.session.config().class_name,
        );
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.image.width() as _, frame.image.height() as _],
            frame.image.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_image, Default::default()),
            None => {
                self.texture =
                    Some(ctx.load_texture("current_image", color_image, Default::default()))
            }
        }
        self.frame = Some(frame);
        self.dirty = false;
    }

    fn tick_status(&mut self, dt: f32) {
        if let Some((_, remaining)) = &mut self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }
}

impl eframe::App for LabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.sync_source() {
            log::info!("session ended: {:?}", self.session.state());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        self.tick_status(ctx.input(|i| i.stable_dt));
        self.refresh(ctx);

        crate::ui::top::top_panel(self, ctx);
        crate::ui::central::central_panel(self, ctx);

        if self.dirty || self.status_message.is_some() {
            ctx.request_repaint();
        }
    }
}

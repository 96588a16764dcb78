//! Annotation session: the drag state machine plus image navigation.
//!
//! Pointer handling is a pure [`transition`] function so it can be exercised
//! without a window. [`Session`] owns everything mutable for one run: the
//! image list, the current index, the committed boxes and the drag state.

use std::path::PathBuf;

use crate::codec;
use crate::config::SessionConfig;
use crate::error::{LabelError, Result};
use crate::models::{BoundingBox, Dimensions, DraftBox, ImageRef, Point};
use crate::source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DraftBox),
}

impl DragState {
    pub fn draft(&self) -> Option<&DraftBox> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(draft) => Some(draft),
        }
    }
}

/// Applies one pointer event. Returns the next state and the box to commit,
/// if the release produced one at least `min_side + 1` pixels on both axes.
pub fn transition(
    state: DragState,
    event: PointerEvent,
    min_side: i32,
) -> (DragState, Option<BoundingBox>) {
    match (state, event) {
        // a lost release: restart from the new press
        (_, PointerEvent::Down(p)) => (DragState::Dragging(DraftBox::at(p)), None),
        (DragState::Dragging(draft), PointerEvent::Move(p)) => (
            DragState::Dragging(DraftBox { corner: p, ..draft }),
            None,
        ),
        (DragState::Dragging(draft), PointerEvent::Up(p)) => {
            let bbox = DraftBox { corner: p, ..draft }.normalized();
            let keep = bbox.width() > min_side && bbox.height() > min_side;
            (DragState::Idle, keep.then_some(bbox))
        }
        (DragState::Idle, PointerEvent::Move(_) | PointerEvent::Up(_)) => (DragState::Idle, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SaveAndNext,
    Next,
    Previous,
    Undo,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved { path: PathBuf, boxes: usize },
    /// Save requested with no boxes: nothing written, still on the same image.
    NothingToSave,
    Advanced,
    Retreated,
    Undone { remaining: usize },
    NothingToUndo,
    Quit,
    /// The session had already ended; the command did nothing.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Annotating,
    /// Advanced past the last image.
    Complete,
    Quit,
}

pub struct Session {
    config: SessionConfig,
    images: Vec<ImageRef>,
    index: usize,
    dimensions: Option<Dimensions>,
    boxes: Vec<BoundingBox>,
    drag: DragState,
    state: SessionState,
}

impl Session {
    /// Enumerates `config.image_dir` and enters the first readable image.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let images = source::list_images(&config.image_dir)?;
        Self::new(config, images)
    }

    pub fn new(config: SessionConfig, images: Vec<ImageRef>) -> Result<Self> {
        if images.is_empty() {
            return Err(LabelError::EmptyDirectory {
                dir: config.image_dir.clone(),
            });
        }
        let mut session = Self {
            config,
            images,
            index: 0,
            dimensions: None,
            boxes: Vec::new(),
            drag: DragState::Idle,
            state: SessionState::Annotating,
        };
        session.enter();
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.images.len()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != SessionState::Annotating
    }

    pub fn current_image(&self) -> Option<&ImageRef> {
        match self.state {
            SessionState::Annotating => self.images.get(self.index),
            _ => None,
        }
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn draft(&self) -> Option<&DraftBox> {
        self.drag.draft()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<BoundingBox> {
        if self.is_finished() {
            return None;
        }
        let (next, committed) = transition(self.drag, event, self.config.min_box_side);
        self.drag = next;
        if let Some(bbox) = committed {
            log::debug!("committed box {:?}", bbox);
            self.boxes.push(bbox);
        }
        committed
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        if self.is_finished() {
            return Ok(Outcome::Finished);
        }
        self.drag = DragState::Idle;

        match command {
            Command::SaveAndNext => {
                let Some(path) = self.save()? else {
                    log::info!("no boxes on {}, nothing saved", self.current_name());
                    return Ok(Outcome::NothingToSave);
                };
                let boxes = self.boxes.len();
                self.advance();
                Ok(Outcome::Saved { path, boxes })
            }
            Command::Next => {
                self.advance();
                Ok(Outcome::Advanced)
            }
            Command::Previous => {
                self.index = self.index.saturating_sub(1);
                self.enter();
                Ok(Outcome::Retreated)
            }
            Command::Undo => match self.boxes.pop() {
                Some(_) => {
                    let remaining = self.boxes.len();
                    log::debug!("removed last box, {} left", remaining);
                    Ok(Outcome::Undone { remaining })
                }
                None => Ok(Outcome::NothingToUndo),
            },
            Command::Quit => {
                if !self.boxes.is_empty() {
                    log::info!(
                        "quit with {} unsaved boxes on {}",
                        self.boxes.len(),
                        self.current_name()
                    );
                }
                self.boxes.clear();
                self.state = SessionState::Quit;
                Ok(Outcome::Quit)
            }
        }
    }

    /// Called by the host when the current image cannot be decoded for display.
    pub fn skip_unreadable(&mut self) {
        if self.is_finished() {
            return;
        }
        log::warn!("skipping unreadable image {}", self.current_name());
        self.drag = DragState::Idle;
        self.advance();
    }

    fn save(&self) -> Result<Option<PathBuf>> {
        let (Some(image), Some(dims)) = (self.images.get(self.index), self.dimensions) else {
            return Ok(None);
        };
        let path = codec::label_path(&self.config.label_dir, image.path());
        if codec::write_labels(&path, &self.boxes, dims.width, dims.height)? {
            log::info!("saved {} boxes to {}", self.boxes.len(), path.display());
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    fn advance(&mut self) {
        self.index += 1;
        self.enter();
    }

    /// Enters the image at `index`, skipping files whose size cannot be read,
    /// and loads any saved boxes for it.
    fn enter(&mut self) {
        self.boxes.clear();
        self.dimensions = None;

        while let Some(image) = self.images.get(self.index) {
            match image.dimensions() {
                Ok(dims) => {
                    let path = codec::label_path(&self.config.label_dir, image.path());
                    self.boxes = codec::read_labels(&path, dims.width, dims.height)
                        .unwrap_or_else(|e| {
                            log::warn!("cannot load {}: {}", path.display(), e);
                            Vec::new()
                        });
                    self.dimensions = Some(dims);
                    log::debug!(
                        "entered {} ({}/{}), {} boxes loaded",
                        image.file_name(),
                        self.index + 1,
                        self.images.len(),
                        self.boxes.len()
                    );
                    return;
                }
                Err(e) => {
                    log::warn!("{}", e);
                    self.index += 1;
                }
            }
        }

        log::info!("all {} images visited", self.images.len());
        self.state = SessionState::Complete;
    }

    fn current_name(&self) -> String {
        self.images
            .get(self.index)
            .map(ImageRef::file_name)
            .unwrap_or_default()
    }
}

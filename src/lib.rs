pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod source;
pub mod ui;
pub mod utils;

pub use config::SessionConfig;
pub use error::{LabelError, Result};
pub use models::{BoundingBox, Dimensions, DraftBox, ImageRef, LabelRecord, Point};
pub use session::{Command, DragState, Outcome, PointerEvent, Session, SessionState};

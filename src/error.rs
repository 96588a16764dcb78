use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("no .jpg/.jpeg/.png images found in {}", dir.display())]
    EmptyDirectory { dir: PathBuf },

    #[error("unable to read image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("corrupt label record {line:?}: {reason}")]
    CorruptRecord { line: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid data config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T, E = LabelError> = std::result::Result<T, E>;

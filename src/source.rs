use std::fs;
use std::path::Path;

use crate::error::{LabelError, Result};
use crate::models::ImageRef;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists images in file-system enumeration order. Nothing is decoded here.
pub fn list_images(dir: &Path) -> Result<Vec<ImageRef>> {
    let empty = || LabelError::EmptyDirectory {
        dir: dir.to_path_buf(),
    };

    let entries = fs::read_dir(dir).map_err(|e| {
        log::error!("cannot read image directory {}: {}", dir.display(), e);
        empty()
    })?;

    let images: Vec<ImageRef> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map_or(false, |t| t.is_file()))
        .map(|entry| entry.path())
        .filter(|path| is_image_file(path))
        .map(ImageRef::new)
        .collect();

    if images.is_empty() {
        return Err(empty());
    }
    log::info!("found {} images in {}", images.len(), dir.display());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_image_file(Path::new("a/b.JPG")));
        assert!(is_image_file(Path::new("b.jpeg")));
        assert!(is_image_file(Path::new("b.Png")));
        assert!(!is_image_file(Path::new("b.txt")));
        assert!(!is_image_file(Path::new("jpg")));
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_images(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LabelError::EmptyDirectory { .. }));
    }
}

use std::fs;
use std::path::PathBuf;

use box_labeler::config::SessionConfig;
use box_labeler::models::BoundingBox;
use image::{ImageBuffer, Rgb};
use tempfile::TempDir;

/// A scratch dataset with `images/` and `labels/` side by side.
/// Keep the returned TempDir alive for the duration of the test.
pub fn create_dataset() -> (SessionConfig, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let image_dir = dir.path().join("images");
    fs::create_dir_all(&image_dir).expect("Failed to create image directory");
    let config = SessionConfig {
        image_dir,
        label_dir: dir.path().join("labels"),
        class_name: "first_aid_kit".to_string(),
        ..SessionConfig::default()
    };
    (config, dir)
}

/// Writes a solid-color PNG of the given size.
pub fn add_image(config: &SessionConfig, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([200u8, 30u8, 30u8]));
    let path = config.image_dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// A file with an image extension whose content is not an image.
pub fn add_broken_image(config: &SessionConfig, name: &str) -> PathBuf {
    let path = config.image_dir.join(name);
    fs::write(&path, b"definitely not a png").expect("Failed to write broken image");
    path
}

pub fn label_file(config: &SessionConfig, stem: &str) -> PathBuf {
    config.label_dir.join(format!("{stem}.txt"))
}

pub fn write_label_text(config: &SessionConfig, stem: &str, text: &str) {
    fs::create_dir_all(&config.label_dir).expect("Failed to create label directory");
    fs::write(label_file(config, stem), text).expect("Failed to write label file");
}

pub fn assert_boxes_close(actual: &[BoundingBox], expected: &[BoundingBox]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        let close = (a.x1 - e.x1).abs() <= 1
            && (a.y1 - e.y1).abs() <= 1
            && (a.x2 - e.x2).abs() <= 1
            && (a.y2 - e.y2).abs() <= 1;
        assert!(close, "{a:?} is not within 1px of {e:?}");
    }
}

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LabelError, Result};
use crate::models::{BoundingBox, LabelRecord, Point};

/// Single-class tool: every record carries class 0.
pub const CLASS_ID: u32 = 0;

/// `<label_dir>/<image stem>.txt`
pub fn label_path(label_dir: &Path, image_path: &Path) -> PathBuf {
    // Stems may contain dots (`img.v1`): append the extension, never substitute it.
    let mut name = image_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".txt");
    label_dir.join(name)
}

pub fn encode(bbox: &BoundingBox, width: u32, height: u32) -> LabelRecord {
    let w = width as f64;
    let h = height as f64;
    LabelRecord {
        class_id: CLASS_ID,
        center_x: (bbox.x1 + bbox.x2) as f64 / 2.0 / w,
        center_y: (bbox.y1 + bbox.y2) as f64 / 2.0 / h,
        width: (bbox.x2 - bbox.x1) as f64 / w,
        height: (bbox.y2 - bbox.y1) as f64 / h,
    }
}

pub fn decode(record: &LabelRecord, width: u32, height: u32) -> BoundingBox {
    let w = width as f64;
    let h = height as f64;
    let cx = record.center_x * w;
    let cy = record.center_y * h;
    let half_w = record.width * w / 2.0;
    let half_h = record.height * h / 2.0;
    BoundingBox::from_corners(
        Point::new((cx - half_w).round() as i32, (cy - half_h).round() as i32),
        Point::new((cx + half_w).round() as i32, (cy + half_h).round() as i32),
    )
}

/// Replaces the label file with `boxes`. An empty set writes nothing and
/// leaves the file system untouched; returns whether a file was written.
pub fn write_labels(path: &Path, boxes: &[BoundingBox], width: u32, height: u32) -> Result<bool> {
    if boxes.is_empty() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = BufWriter::new(File::create(path)?);
    for bbox in boxes {
        writeln!(file, "{}", encode(bbox, width, height))?;
    }
    file.flush()?;
    Ok(true)
}

/// Loads boxes from a label file. A missing file means "not labeled yet" and
/// yields an empty list; corrupt lines are logged and skipped.
pub fn read_labels(path: &Path, width: u32, height: u32) -> Result<Vec<BoundingBox>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut boxes = Vec::new();
    for (lineno, bytes) in BufReader::new(file).split(b'\n').enumerate() {
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                let err = LabelError::CorruptRecord {
                    line: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    reason: e.utf8_error().to_string(),
                };
                log::warn!("{}:{}: skipped, {}", path.display(), lineno + 1, err);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<LabelRecord>() {
            Ok(record) => boxes.push(decode(&record, width, height)),
            Err(e) => log::warn!("{}:{}: skipped, {}", path.display(), lineno + 1, e),
        }
    }
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn within_one(a: &BoundingBox, b: &BoundingBox) -> bool {
        (a.x1 - b.x1).abs() <= 1
            && (a.y1 - b.y1).abs() <= 1
            && (a.x2 - b.x2).abs() <= 1
            && (a.y2 - b.y2).abs() <= 1
    }

    #[test]
    fn encodes_reference_example() {
        let bbox = BoundingBox { x1: 50, y1: 50, x2: 150, y2: 150 };
        let record = encode(&bbox, 400, 300);
        assert_abs_diff_eq!(record.center_x, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(record.center_y, 1.0 / 3.0, epsilon = 1e-9);
        assert_eq!(record.to_string(), "0 0.250000 0.333333 0.250000 0.333333");

        let parsed: LabelRecord = record.to_string().parse().unwrap();
        assert_eq!(decode(&parsed, 400, 300), bbox);
    }

    #[test]
    fn round_trip_stays_within_a_pixel() {
        let dims = [(400, 300), (1920, 1080), (37, 113), (1, 1), (4000, 3)];
        for &(w, h) in &dims {
            for x1 in (0..w as i32).step_by((w as usize / 7).max(1)) {
                for y1 in (0..h as i32).step_by((h as usize / 5).max(1)) {
                    let bbox = BoundingBox {
                        x1,
                        y1,
                        x2: (x1 + 17).min(w as i32),
                        y2: (y1 + 23).min(h as i32),
                    };
                    let text = encode(&bbox, w, h).to_string();
                    let back = decode(&text.parse().unwrap(), w, h);
                    assert!(within_one(&bbox, &back), "{bbox:?} -> {text} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn label_path_uses_stem() {
        let p = label_path(Path::new("labels"), Path::new("images/img7.JPG"));
        assert_eq!(p, Path::new("labels/img7.txt"));

        let v1 = label_path(Path::new("labels"), Path::new("images/img.v1.jpg"));
        let v2 = label_path(Path::new("labels"), Path::new("images/img.v2.jpg"));
        assert_eq!(v1, Path::new("labels/img.v1.txt"));
        assert_eq!(v2, Path::new("labels/img.v2.txt"));
    }

    #[test]
    fn decode_keeps_corner_order() {
        let record = LabelRecord {
            class_id: 0,
            center_x: 0.5,
            center_y: 0.5,
            width: -0.0025,
            height: 0.1,
        };
        let bbox = decode(&record, 400, 300);
        assert!(bbox.x1 <= bbox.x2 && bbox.y1 <= bbox.y2, "{bbox:?}");
    }
}

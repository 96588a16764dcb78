use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;

use crate::error::{LabelError, Result};

/// Pixel position in source-image scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in source pixels, `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Orders the corners so the result always satisfies the min/max invariant.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Restores the corner order for boxes built field by field.
    pub fn normalized(&self) -> Self {
        Self::from_corners(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// The box being dragged: `origin` stays put, `corner` follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftBox {
    pub origin: Point,
    pub corner: Point,
}

impl DraftBox {
    pub fn at(p: Point) -> Self {
        Self { origin: p, corner: p }
    }

    pub fn normalized(&self) -> BoundingBox {
        BoundingBox::from_corners(self.origin, self.corner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// An image file found in the source directory. Pixels are never cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Reads only the header; the display surface is not involved.
    pub fn dimensions(&self) -> Result<Dimensions> {
        let (width, height) =
            image::image_dimensions(&self.path).map_err(|source| LabelError::UnreadableImage {
                path: self.path.clone(),
                source,
            })?;
        Ok(Dimensions { width, height })
    }

    pub fn decode(&self) -> Result<RgbaImage> {
        let img = image::open(&self.path).map_err(|source| LabelError::UnreadableImage {
            path: self.path.clone(),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}

/// One line of a label file: `class cx cy w h`, all four values normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRecord {
    pub class_id: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for LabelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.center_x, self.center_y, self.width, self.height
        )
    }
}

impl FromStr for LabelRecord {
    type Err = LabelError;

    fn from_str(line: &str) -> Result<Self> {
        let corrupt = |reason: String| LabelError::CorruptRecord {
            line: line.to_string(),
            reason,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(corrupt(format!("expected 5 fields, found {}", parts.len())));
        }

        let class_id = parts[0]
            .parse::<u32>()
            .map_err(|e| corrupt(format!("class id: {e}")))?;
        let mut values = [0.0f64; 4];
        for (value, part) in values.iter_mut().zip(&parts[1..]) {
            *value = part
                .parse::<f64>()
                .map_err(|e| corrupt(format!("{part:?}: {e}")))?;
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(corrupt("non-finite value".to_string()));
        }
        if values[2] < 0.0 || values[3] < 0.0 {
            return Err(corrupt("negative box extent".to_string()));
        }

        Ok(Self {
            class_id,
            center_x: values[0],
            center_y: values[1],
            width: values[2],
            height: values[3],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_orders_any_drag_direction() {
        let b = BoundingBox::from_corners(Point::new(150, 20), Point::new(50, 90));
        assert_eq!(b, BoundingBox { x1: 50, y1: 20, x2: 150, y2: 90 });
        assert_eq!((b.width(), b.height()), (100, 70));
    }

    #[test]
    fn record_parses_and_prints_six_decimals() {
        let record: LabelRecord = "0 0.25 0.333333 0.25 0.333333".parse().unwrap();
        assert_eq!(record.class_id, 0);
        assert_eq!(record.to_string(), "0 0.250000 0.333333 0.250000 0.333333");
    }

    #[test]
    fn record_rejects_wrong_field_count() {
        let err = "0 0.5 0.5 0.1".parse::<LabelRecord>().unwrap_err();
        assert!(matches!(err, LabelError::CorruptRecord { .. }));
    }

    #[test]
    fn record_rejects_negative_or_non_finite_values() {
        for line in [
            "0 0.5 0.5 -0.0025 0.1",
            "0 0.5 0.5 0.1 -0.2",
            "0 NaN 0.5 0.1 0.1",
            "0 0.5 0.5 inf 0.1",
        ] {
            let err = line.parse::<LabelRecord>().unwrap_err();
            assert!(matches!(err, LabelError::CorruptRecord { .. }), "{line}");
        }
    }

    #[test]
    fn record_rejects_non_numeric_field() {
        let err = "0 0.5 abc 0.1 0.1".parse::<LabelRecord>().unwrap_err();
        assert!(matches!(err, LabelError::CorruptRecord { .. }));
    }
}

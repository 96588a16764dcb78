use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::{BoundingBox, DraftBox};

pub const BOX_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const DRAFT_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const STATUS_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const STROKE: i32 = 2;
const CAPTION_OFFSET: i32 = 10;

/// Text to be drawn by the host surface, anchored at its bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Rgba<u8>,
}

/// A displayable frame: the annotated raster plus the text layered over it.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub captions: Vec<Caption>,
}

pub fn status_line(index: usize, total: usize, box_count: usize) -> String {
    format!("image {}/{}, box count {}", index + 1, total, box_count)
}

/// Draws committed boxes, the draft (if any) and the status line onto a copy
/// of `source`.
pub fn render(
    source: &RgbaImage,
    boxes: &[BoundingBox],
    draft: Option<&DraftBox>,
    index: usize,
    total: usize,
    class_name: &str,
) -> Frame {
    let mut image = source.clone();
    let mut captions = Vec::with_capacity(boxes.len() + 1);

    for bbox in boxes.iter().map(BoundingBox::normalized) {
        outline(&mut image, &bbox, BOX_COLOR);
        captions.push(Caption {
            text: class_name.to_string(),
            x: bbox.x1,
            y: bbox.y1 - CAPTION_OFFSET,
            color: BOX_COLOR,
        });
    }

    if let Some(draft) = draft {
        outline(&mut image, &draft.normalized(), DRAFT_COLOR);
    }

    captions.push(Caption {
        text: status_line(index, total, boxes.len()),
        x: 10,
        y: 30,
        color: STATUS_COLOR,
    });

    Frame { image, captions }
}

fn outline(image: &mut RgbaImage, bbox: &BoundingBox, color: Rgba<u8>) {
    let bbox = bbox.normalized();
    for inset in 0..STROKE {
        if inset > 0 && (bbox.width() < 2 * inset || bbox.height() < 2 * inset) {
            break;
        }
        // Rect rejects zero sizes; both end pixels are included
        let w = (bbox.width() - 2 * inset) as u32 + 1;
        let h = (bbox.height() - 2 * inset) as u32 + 1;
        let rect = Rect::at(bbox.x1 + inset, bbox.y1 + inset).of_size(w, h);
        draw_hollow_rect_mut(image, rect, color);
    }
}

use crate::marking::domain::frame_marker::FrameMarker;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::FACE_MARK_COLOR;
use crate::shared::frame::Frame;

/// Draws a one-pixel outline around each box.
pub struct OutlineMarker {
    color: [u8; 3],
}

impl OutlineMarker {
    pub fn new(color: [u8; 3]) -> Self {
        Self { color }
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }
}

impl Default for OutlineMarker {
    fn default() -> Self {
        Self::new(FACE_MARK_COLOR)
    }
}

impl FrameMarker for OutlineMarker {
    fn mark(
        &self,
        frame: &mut Frame,
        boxes: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for bbox in boxes {
            mark_box(frame, bbox, self.color);
        }
        Ok(())
    }
}

/// Sets the full rows at `min.y` and `max.y` and the full columns at `min.x`
/// and `max.x`, corners included. Interior pixels are untouched; pixels
/// outside the frame are skipped.
pub fn mark_box(frame: &mut Frame, bbox: &BoundingBox, color: [u8; 3]) {
    let (min, max) = (bbox.min, bbox.max);
    for x in min.x..=max.x {
        frame.set_pixel(x, min.y, color);
        frame.set_pixel(x, max.y, color);
    }
    for y in min.y..=max.y {
        frame.set_pixel(min.x, y, color);
        frame.set_pixel(max.x, y, color);
    }
}

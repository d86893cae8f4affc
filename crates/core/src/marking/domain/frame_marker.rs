use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for annotating detected boxes on a frame.
///
/// Implementations modify the frame in-place.
pub trait FrameMarker: Send {
    fn mark(&self, frame: &mut Frame, boxes: &[BoundingBox])
        -> Result<(), Box<dyn std::error::Error>>;
}

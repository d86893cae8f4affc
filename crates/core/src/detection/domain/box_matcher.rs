use crate::shared::block::BlockCoord;
use crate::shared::bounding_box::BoundingBox;

/// Envelope of a component's block coordinates, `None` for an empty component.
pub fn find_bounding_box(component: &[BlockCoord]) -> Option<BoundingBox> {
    BoundingBox::enclosing(component)
}

/// Bounding boxes of the components with at least `min_size` blocks, in
/// component order.
pub fn component_boxes(components: &[Vec<BlockCoord>], min_size: usize) -> Vec<BoundingBox> {
    components
        .iter()
        .filter(|c| c.len() >= min_size)
        .filter_map(|c| find_bounding_box(c))
        .collect()
}

/// True when a skin corner lies inside the hair box (inclusive), or the skin
/// box's top row equals the hair box's bottom row.
///
/// Only skin corners are tested against the hair box, never the reverse.
pub fn skin_hair_match(skin: &BoundingBox, hair: &BoundingBox) -> bool {
    skin.corners().iter().any(|&corner| hair.contains(corner)) || skin.top() == hair.bottom()
}

/// Emits each skin box once per matching hair box.
pub fn match_faces(skin_boxes: &[BoundingBox], hair_boxes: &[BoundingBox]) -> Vec<BoundingBox> {
    skin_boxes
        .iter()
        .flat_map(|skin| {
            hair_boxes
                .iter()
                .filter(move |hair| skin_hair_match(skin, hair))
                .map(move |_| *skin)
        })
        .collect()
}

use ndarray::s;

use crate::detection::domain::block_graph::{BlockGraph, GraphError};
use crate::detection::domain::box_matcher::{component_boxes, match_faces};
use crate::detection::domain::color_classifier::PixelClass;
use crate::detection::domain::detector_config::{ConfigError, DetectorConfig};
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::block::{column_major, BlockCoord};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::color::Color;
use crate::shared::frame::Frame;

/// Skin and hair block graphs from one scan of an image.
#[derive(Clone, Debug)]
pub struct BlockGraphs {
    pub skin: BlockGraph<BlockCoord>,
    pub hair: BlockGraph<BlockCoord>,
}

impl BlockGraphs {
    fn new() -> Self {
        Self {
            skin: BlockGraph::new(column_major),
            hair: BlockGraph::new(column_major),
        }
    }

    fn for_class_mut(&mut self, class: PixelClass) -> &mut BlockGraph<BlockCoord> {
        match class {
            PixelClass::Skin => &mut self.skin,
            PixelClass::Hair => &mut self.hair,
        }
    }
}

/// Finds faces as skin regions that touch hair regions.
///
/// The image is tiled into square blocks. A block whose matching pixels
/// reach `block_size² × majority` is a skin block, or failing that a hair
/// block. Adjacent blocks of one class form components; components below
/// `min_component_size` are dropped, and each remaining skin box that meets
/// a hair box is reported as a face.
pub struct SkinHairDetector {
    config: DetectorConfig,
}

impl SkinHairDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// True when enough in-bounds pixels of the block match `class`.
    ///
    /// Pixels of the footprint that fall outside the image are skipped, but
    /// the threshold still assumes a full block.
    pub fn is_skin_hair_block(&self, frame: &Frame, block: BlockCoord, class: PixelClass) -> bool {
        self.count_matching(frame, block, class) as f64 >= self.config.block_threshold()
    }

    /// Skin wins over hair; a block is never both.
    pub fn classify_block(&self, frame: &Frame, block: BlockCoord) -> Option<PixelClass> {
        [PixelClass::Skin, PixelClass::Hair]
            .into_iter()
            .find(|&class| self.is_skin_hair_block(frame, block, class))
    }

    /// Scans blocks top-to-bottom, left-to-right and links each classified
    /// block to its already-visited neighbours of the same class.
    pub fn make_block_graph(&self, frame: &Frame) -> Result<BlockGraphs, GraphError> {
        let mut graphs = BlockGraphs::new();
        let side = self.side();

        for block in block_origins(frame, side) {
            let Some(class) = self.classify_block(frame, block) else {
                continue;
            };
            let graph = graphs.for_class_mut(class);
            graph.add_node(block);
            for neighbour in block.visited_neighbours(side) {
                if graph.is_node(&neighbour) {
                    graph.link_to_existing(block, &neighbour)?;
                }
            }
        }

        Ok(graphs)
    }

    /// Skin boxes with at least one matching hair box, once per match.
    pub fn detect_faces(&self, frame: &Frame) -> Result<Vec<BoundingBox>, GraphError> {
        let graphs = self.make_block_graph(frame)?;
        log::debug!(
            "Classified {} skin and {} hair blocks",
            graphs.skin.len(),
            graphs.hair.len()
        );

        let skin_components = graphs.skin.connected_components();
        let hair_components = graphs.hair.connected_components();
        let min_size = self.config.min_component_size;
        let skin_boxes = component_boxes(&skin_components, min_size);
        let hair_boxes = component_boxes(&hair_components, min_size);
        log::debug!(
            "Kept {}/{} skin and {}/{} hair components (min size {min_size})",
            skin_boxes.len(),
            skin_components.len(),
            hair_boxes.len(),
            hair_components.len(),
        );

        let faces = match_faces(&skin_boxes, &hair_boxes);
        log::debug!("Matched {} face boxes", faces.len());
        Ok(faces)
    }

    fn side(&self) -> i32 {
        // validate() keeps block_size within i32
        self.config.block_size as i32
    }

    fn count_matching(&self, frame: &Frame, block: BlockCoord, class: PixelClass) -> usize {
        let (width, height) = frame.size();
        let side = i64::from(self.config.block_size);
        let clamp_x = |v: i64| v.clamp(0, i64::from(width)) as usize;
        let clamp_y = |v: i64| v.clamp(0, i64::from(height)) as usize;
        let (bx, by) = (i64::from(block.x), i64::from(block.y));
        let (x0, x1) = (clamp_x(bx), clamp_x(bx + side));
        let (y0, y1) = (clamp_y(by), clamp_y(by + side));

        let image = frame.as_ndarray();
        let footprint = image.slice(s![y0..y1, x0..x1, ..]);
        footprint
            .rows()
            .into_iter()
            .filter(|px| class.matches(&Color::new([px[0], px[1], px[2]])))
            .count()
    }
}

impl FaceDetector for SkinHairDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        Ok(self.detect_faces(frame)?)
    }
}

/// Top-left corners of every whole block, row-major. Partial blocks at the
/// right and bottom edges are not produced.
fn block_origins(frame: &Frame, side: i32) -> impl Iterator<Item = BlockCoord> {
    let (width, height) = frame.size();
    let side = i64::from(side);
    let step = side as usize;
    let last_x = i64::from(width) - side;
    let last_y = i64::from(height) - side;
    (0..=last_y).step_by(step).flat_map(move |y| {
        (0..=last_x)
            .step_by(step)
            .map(move |x| BlockCoord::new(x as i32, y as i32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SKIN: [u8; 3] = [200, 120, 90];
    const HAIR: [u8; 3] = [30, 20, 10];
    const WHITE: [u8; 3] = [255, 255, 255];

    fn detector(block_size: u32, min_component_size: usize, majority: f64) -> SkinHairDetector {
        SkinHairDetector::new(DetectorConfig::new(block_size, min_component_size, majority))
            .unwrap()
    }

    fn paint(frame: &mut Frame, x0: i32, y0: i32, x1: i32, y1: i32, rgb: [u8; 3]) {
        for y in y0..y1 {
            for x in x0..x1 {
                frame.set_pixel(x, y, rgb);
            }
        }
    }

    fn c(x: i32, y: i32) -> BlockCoord {
        BlockCoord::new(x, y)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(SkinHairDetector::new(DetectorConfig::new(0, 10, 0.5)).is_err());
        assert!(SkinHairDetector::new(DetectorConfig::new(5, 10, 0.0)).is_err());
    }

    // ── Block scan ───────────────────────────────────────────────────

    #[test]
    fn test_block_origins_row_major() {
        let frame = Frame::filled(10, 10, WHITE);
        let blocks: Vec<_> = block_origins(&frame, 5).collect();
        assert_eq!(blocks, vec![c(0, 0), c(5, 0), c(0, 5), c(5, 5)]);
    }

    #[test]
    fn test_block_origins_truncate_partial_blocks() {
        let frame = Frame::filled(12, 7, WHITE);
        let blocks: Vec<_> = block_origins(&frame, 5).collect();
        assert_eq!(blocks, vec![c(0, 0), c(5, 0)]);
    }

    #[rstest]
    #[case::zero_size(0, 0)]
    #[case::narrower_than_block(4, 20)]
    #[case::shorter_than_block(20, 4)]
    fn test_block_origins_degenerate(#[case] w: u32, #[case] h: u32) {
        let frame = Frame::filled(w, h, SKIN);
        assert_eq!(block_origins(&frame, 5).count(), 0);
    }

    // ── Block classification ─────────────────────────────────────────

    #[test]
    fn test_block_majority_threshold_is_inclusive() {
        // 8 of 16 skin pixels
        let mut frame = Frame::filled(4, 4, WHITE);
        paint(&mut frame, 0, 0, 4, 2, SKIN);
        assert!(detector(4, 1, 0.5).is_skin_hair_block(&frame, c(0, 0), PixelClass::Skin));
        assert!(!detector(4, 1, 0.5625).is_skin_hair_block(&frame, c(0, 0), PixelClass::Skin));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_skipped() {
        // block at (5,0) in a 7-wide image has 2x5 = 10 pixels on screen
        let frame = Frame::filled(7, 5, SKIN);
        assert!(detector(5, 1, 0.375).is_skin_hair_block(&frame, c(5, 0), PixelClass::Skin));
        assert!(!detector(5, 1, 0.5).is_skin_hair_block(&frame, c(5, 0), PixelClass::Skin));
    }

    #[test]
    fn test_classify_prefers_skin() {
        // dark enough for hair, red enough for skin
        let both = [110, 60, 30];
        let frame = Frame::filled(5, 5, both);
        let d = detector(5, 1, 0.5);
        assert!(d.is_skin_hair_block(&frame, c(0, 0), PixelClass::Hair));
        assert_eq!(d.classify_block(&frame, c(0, 0)), Some(PixelClass::Skin));
    }

    #[test]
    fn test_classify_hair_and_neither() {
        let hair = Frame::filled(5, 5, HAIR);
        let white = Frame::filled(5, 5, WHITE);
        let d = detector(5, 1, 0.5);
        assert_eq!(d.classify_block(&hair, c(0, 0)), Some(PixelClass::Hair));
        assert_eq!(d.classify_block(&white, c(0, 0)), None);
    }

    #[test]
    fn test_raising_majority_never_adds_blocks() {
        // a noisy mix so each block has a different skin count
        let mut frame = Frame::filled(30, 30, WHITE);
        for y in 0..30 {
            for x in 0..30 {
                if (x * 7 + y * 3) % 5 < (x / 5 + y / 5) % 5 {
                    frame.set_pixel(x, y, SKIN);
                }
            }
        }
        let mut previous = usize::MAX;
        for majority in [0.1, 0.2, 0.3, 0.5, 0.7, 0.9, 1.0] {
            let graphs = detector(5, 1, majority).make_block_graph(&frame).unwrap();
            let skin = graphs.skin.len();
            assert!(skin <= previous, "majority {majority}: {skin} > {previous}");
            previous = skin;
        }
    }

    // ── Graph construction ───────────────────────────────────────────

    #[test]
    fn test_make_block_graph_separates_classes() {
        let mut frame = Frame::filled(20, 10, WHITE);
        paint(&mut frame, 0, 0, 10, 10, SKIN);
        paint(&mut frame, 10, 0, 20, 10, HAIR);
        let graphs = detector(5, 1, 0.5).make_block_graph(&frame).unwrap();

        assert_eq!(graphs.skin.len(), 4);
        assert_eq!(graphs.hair.len(), 4);
        assert!(graphs.skin.is_node(&c(5, 5)));
        assert!(!graphs.skin.is_node(&c(10, 0)));
        assert!(graphs.hair.is_node(&c(10, 0)));
        assert_eq!(graphs.skin.connected_components().len(), 1);
        assert_eq!(graphs.hair.connected_components().len(), 1);
    }

    #[test]
    fn test_make_block_graph_links_visited_neighbours() {
        let frame = Frame::filled(10, 10, SKIN);
        let graphs = detector(5, 1, 0.5).make_block_graph(&frame).unwrap();
        // (5,5) links to left, top-left and top; (0,5) to top and top-right
        assert_eq!(graphs.skin.degree(&c(5, 5)), Some(3));
        assert_eq!(graphs.skin.degree(&c(0, 5)), Some(3));
        assert_eq!(graphs.skin.degree(&c(0, 0)), Some(3));
        assert_eq!(graphs.skin.degree(&c(5, 0)), Some(3));
    }

    #[test]
    fn test_make_block_graph_diagonal_top_right() {
        let mut frame = Frame::filled(10, 10, WHITE);
        paint(&mut frame, 5, 0, 10, 5, SKIN);
        paint(&mut frame, 0, 5, 5, 10, SKIN);
        let graphs = detector(5, 1, 0.5).make_block_graph(&frame).unwrap();
        assert_eq!(
            graphs.skin.connected_components(),
            vec![vec![c(0, 5), c(5, 0)]]
        );
    }

    // ── Detection ────────────────────────────────────────────────────

    #[test]
    fn test_detect_faces_framed_by_hair() {
        let mut frame = Frame::filled(20, 20, WHITE);
        paint(&mut frame, 0, 0, 20, 5, HAIR);
        paint(&mut frame, 0, 5, 5, 20, HAIR);
        paint(&mut frame, 5, 5, 15, 15, SKIN);
        let faces = detector(5, 2, 0.5).detect_faces(&frame).unwrap();
        assert_eq!(faces, vec![BoundingBox::from(((5, 5), (10, 10)))]);
    }

    #[test]
    fn test_small_components_are_filtered() {
        let mut frame = Frame::filled(20, 20, WHITE);
        paint(&mut frame, 0, 0, 20, 5, HAIR);
        paint(&mut frame, 0, 5, 5, 20, HAIR);
        paint(&mut frame, 5, 5, 15, 15, SKIN);
        // skin component has 4 blocks
        assert!(detector(5, 5, 0.5).detect_faces(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_detect_faces_no_hair() {
        let frame = Frame::filled(20, 20, SKIN);
        assert!(detector(5, 1, 0.5).detect_faces(&frame).unwrap().is_empty());
    }

    #[rstest]
    #[case::zero_size(0, 0)]
    #[case::block_larger_than_image(3, 3)]
    fn test_detect_faces_degenerate_input(#[case] w: u32, #[case] h: u32) {
        let frame = Frame::filled(w, h, HAIR);
        let d = detector(5, 1, 0.5);
        let graphs = d.make_block_graph(&frame).unwrap();
        assert!(graphs.skin.is_empty());
        assert!(graphs.hair.is_empty());
        assert!(d.detect_faces(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_face_detector_trait() {
        let mut frame = Frame::filled(20, 20, WHITE);
        paint(&mut frame, 0, 0, 20, 5, HAIR);
        paint(&mut frame, 0, 5, 5, 20, HAIR);
        paint(&mut frame, 5, 5, 15, 15, SKIN);
        let mut d: Box<dyn FaceDetector> = Box::new(detector(5, 2, 0.5));
        assert_eq!(d.detect(&frame).unwrap().len(), 1);
    }
}

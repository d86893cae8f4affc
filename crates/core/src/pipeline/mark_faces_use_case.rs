use std::path::Path;
use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::marking::domain::frame_marker::FrameMarker;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::bounding_box::BoundingBox;

/// Single-image pipeline: read → detect → mark → write.
pub struct MarkFacesUseCase {
    reader: Box<dyn ImageReader>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    marker: Box<dyn FrameMarker>,
}

impl MarkFacesUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        marker: Box<dyn FrameMarker>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            marker,
        }
    }

    /// Reads one image, detects faces, outlines them and writes the result.
    ///
    /// Returns the face boxes in detection order, duplicates included.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let mut frame = self.reader.read(input_path)?;

        let start = Instant::now();
        let faces = self.detector.detect(&frame)?;
        logger.timing("detect", elapsed_ms(start));
        logger.metric("faces", faces.len() as f64);

        let start = Instant::now();
        self.marker.mark(&mut frame, &faces)?;
        logger.timing("mark", elapsed_ms(start));

        let start = Instant::now();
        self.image_writer.write(output_path, &frame)?;
        logger.timing("write", elapsed_ms(start));

        logger.info(&format!(
            "{}: {} face box(es) marked in {}",
            input_path.display(),
            faces.len(),
            output_path.display()
        ));
        Ok(faces)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

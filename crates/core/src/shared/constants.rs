/// Side length of a classification block, in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 5;

/// Components with fewer blocks than this are discarded before matching.
pub const DEFAULT_MIN_COMPONENT_SIZE: usize = 10;

/// Fraction of a block's pixels that must match for the block to count.
pub const DEFAULT_MAJORITY: f64 = 0.5;

/// Outline color for detected faces.
pub const FACE_MARK_COLOR: [u8; 3] = [255, 0, 0];

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

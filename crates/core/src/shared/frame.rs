use ndarray::ArrayView3;

/// Number of interleaved channels in every frame (RGB).
pub const CHANNELS: usize = 3;

/// A still image: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; detection reads
/// block footprints through [`Frame::as_ndarray`] and annotation writes
/// through [`Frame::set_pixel`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * CHANNELS)
            .collect();
        Self::new(data, width, height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color at `(x, y)`, or `None` when the position lies outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        let offset = self.offset(x, y)?;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Writes `rgb` at `(x, y)`. Returns `false` (and writes nothing) when the
    /// position lies outside the image.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset..offset + CHANNELS].copy_from_slice(&rgb);
                true
            }
            None => false,
        }
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * CHANNELS)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

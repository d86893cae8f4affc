use crate::shared::block::BlockCoord;

/// Axis-aligned envelope of a set of block coordinates.
///
/// `min` and `max` are block top-left corners, so the box does not extend
/// over the pixels of the last row/column of blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min: BlockCoord,
    pub max: BlockCoord,
}

impl BoundingBox {
    pub const fn new(min: BlockCoord, max: BlockCoord) -> Self {
        Self { min, max }
    }

    /// Envelope of `coords`, `None` for an empty input.
    pub fn enclosing<'a>(coords: impl IntoIterator<Item = &'a BlockCoord>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        let bbox = iter.fold(Self::new(first, first), |acc, c| Self {
            min: BlockCoord::new(acc.min.x.min(c.x), acc.min.y.min(c.y)),
            max: BlockCoord::new(acc.max.x.max(c.x), acc.max.y.max(c.y)),
        });
        Some(bbox)
    }

    pub fn top(&self) -> i32 {
        self.min.y
    }

    pub fn bottom(&self) -> i32 {
        self.max.y
    }

    /// Top-left, bottom-left, top-right, bottom-right.
    pub fn corners(&self) -> [BlockCoord; 4] {
        [
            BlockCoord::new(self.min.x, self.min.y),
            BlockCoord::new(self.min.x, self.max.y),
            BlockCoord::new(self.max.x, self.min.y),
            BlockCoord::new(self.max.x, self.max.y),
        ]
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: BlockCoord) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.x <= self.max.x
            && point.y <= self.max.y
    }
}

impl From<((i32, i32), (i32, i32))> for BoundingBox {
    fn from((min, max): ((i32, i32), (i32, i32))) -> Self {
        Self::new(min.into(), max.into())
    }
}

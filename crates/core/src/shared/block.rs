use std::cmp::Ordering;

/// Top-left pixel of a square block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
}

impl BlockCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Blocks adjacent to `self` that a row-major scan has already visited:
    /// left, top-left, top and top-right.
    pub fn visited_neighbours(self, block_size: i32) -> [BlockCoord; 4] {
        let s = block_size;
        [
            self.offset(-s, 0),
            self.offset(-s, -s),
            self.offset(0, -s),
            self.offset(s, -s),
        ]
    }
}

impl From<(i32, i32)> for BlockCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Orders blocks by column, then by row.
pub fn column_major(a: &BlockCoord, b: &BlockCoord) -> Ordering {
    a.x.cmp(&b.x).then(a.y.cmp(&b.y))
}

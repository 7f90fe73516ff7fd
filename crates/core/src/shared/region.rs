/// A validated censor target: integer-aligned, non-empty, and inside the
/// buffer it was clipped against.
///
/// Produced by the region clipper. Overlapping regions are kept as-is; the
/// engine never merges or deduplicates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Number of block columns and rows when tiled with `block_size` blocks,
    /// counting truncated edge blocks.
    pub fn block_grid(&self, block_size: u32) -> (u32, u32) {
        (
            self.width.div_ceil(block_size),
            self.height.div_ceil(block_size),
        )
    }

    pub fn block_count(&self, block_size: u32) -> usize {
        let (cols, rows) = self.block_grid(block_size);
        cols as usize * rows as usize
    }
}

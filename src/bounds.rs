/// Contiguous range of pixels owned by an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    pub start: usize,
    pub len: usize,
}

impl PixelSpan {
    /// Create a new span
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Span covering a single pixel
    pub const fn single(index: usize) -> Self {
        Self::new(index, 1)
    }

    /// Index one past the last pixel
    pub const fn end(self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Check if two spans share at least one pixel
    pub const fn overlaps(self, other: Self) -> bool {
        if self.len == 0 || other.len == 0 {
            return false;
        }
        self.start < other.end() && other.start < self.end()
    }

    /// Check if the span fits into a strip of `count` pixels
    pub const fn fits(self, count: usize) -> bool {
        self.end() <= count
    }
}

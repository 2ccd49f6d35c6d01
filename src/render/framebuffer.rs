//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a bounds-checked view into a row-major color buffer.

/// A view into a color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass the buffer and its dimensions together.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if the buffer length doesn't match width * height
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a pixel, silently ignoring out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Fill the pixels `x0..=x1` of row `y`. The endpoints may be given in
    /// either order and are clamped to the buffer.
    #[inline]
    pub fn fill_scanline(&mut self, y: i32, x0: i32, x1: i32, color: u32) {
        if y < 0 || y >= self.height as i32 || self.width == 0 {
            return;
        }
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let left = left.max(0);
        let right = right.min(self.width as i32 - 1);
        if left > right {
            return;
        }

        let row = y as usize * self.width as usize;
        self.color_buffer[row + left as usize..=row + right as usize].fill(color);
    }
}

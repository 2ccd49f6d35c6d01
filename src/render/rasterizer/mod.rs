//! Triangle rasterization.
//!
//! [`ScanlineRasterizer`] fills triangles with the flat-top/flat-bottom
//! decomposition. The [`Rasterizer`] trait is the seam the engine and the
//! benchmarks use to drive it.

mod scanline;

pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2;

/// Screen coordinates are clamped to `±PIXEL_COORD_LIMIT` before they are
/// converted to integer pixels, keeping pixel arithmetic inside `i32`.
pub const PIXEL_COORD_LIMIT: f32 = 16_777_216.0;

/// Clamps a finite screen coordinate into the range integer pixel math can
/// handle. Geometry close to the camera projects far outside the buffer.
#[inline]
pub fn clamp_coord(value: f32) -> f32 {
    value.clamp(-PIXEL_COORD_LIMIT, PIXEL_COORD_LIMIT)
}

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
    /// Fill color override; the renderer's fill color is used when `None`.
    pub color: Option<u32>,
}

impl Triangle {
    pub fn new(points: [Vec2; 3], color: Option<u32>) -> Self {
        Self { points, color }
    }

    /// True when every coordinate is finite. Large coordinates are still
    /// drawable; only the on-screen part is rasterized.
    pub fn is_drawable(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a pixel buffer.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to rasterize
    /// * `buffer` - The frame buffer to draw into
    /// * `color` - The color to fill the triangle with
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32);
}

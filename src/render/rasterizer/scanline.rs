//! Scanline-based triangle rasterization.
//!
//! This module implements triangle filling using the classic scanline algorithm
//! with flat-top/flat-bottom triangle decomposition.
//!
//! # Algorithm Overview
//!
//! 1. **Snap** the three vertices to whole pixels
//! 2. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 3. **Decompose** the triangle into a flat-bottom and/or a flat-top part
//! 4. **Sweep** each part one row at a time, stepping the left/right bounds
//!
//! # Triangle Decomposition
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>     v1----M  <- split at v1.y
//!     v1     \               \   |
//!       `-.   \               `-.|
//!          `-. \                 \
//!             `v2                v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! `M` lies on the long edge v0 -> v2 at the height of v1:
//!
//! ```text
//! M.x = v0.x + (v2.x - v0.x) * (v1.y - v0.y) / (v2.y - v0.y)
//! ```
//!
//! # Inverse Slope Stepping
//!
//! Each edge contributes an accumulator that starts at the apex X and moves by
//! the edge's inverse slope (`dx / dy`) once per scanline. The flat-bottom part
//! walks downward from its top apex, the flat-top part walks upward from its
//! bottom apex. Rows outside the buffer are skipped by starting the
//! accumulators at the first visible row.

use super::{clamp_coord, Rasterizer, Triangle};
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// A vertex snapped to the pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    fn from_vec2(p: Vec2) -> Self {
        Self {
            x: clamp_coord(p.x).round() as i32,
            y: clamp_coord(p.y).round() as i32,
        }
    }
}

/// Scanline triangle rasterizer.
///
/// Vertices may be given in any order and any winding. Triangles with
/// non-finite coordinates are skipped without touching the buffer.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by ascending Y with three compare-and-swaps.
    ///
    /// After sorting: `v0.y <= v1.y <= v2.y`
    pub(crate) fn sort_vertices(v0: &mut PixelPoint, v1: &mut PixelPoint, v2: &mut PixelPoint) {
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
        if v2.y < v1.y {
            std::mem::swap(v1, v2);
        }
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Point on the edge v0 -> v2 at the height of v1. Expects sorted
    /// vertices with `v0.y < v2.y`.
    fn split_point(v0: PixelPoint, v1: PixelPoint, v2: PixelPoint) -> PixelPoint {
        let t = (v1.y - v0.y) as f32 / (v2.y - v0.y) as f32;
        PixelPoint {
            x: (v0.x as f32 + (v2.x - v0.x) as f32 * t).round() as i32,
            y: v1.y,
        }
    }

    /// Fills a triangle with its apex `v0` on top and `v1`, `v2` on the same
    /// bottom row.
    ///
    /// ```text
    ///        v0
    ///        /\
    ///       /  \
    ///      /____\
    ///    v1      v2
    /// ```
    fn fill_flat_bottom(
        v0: PixelPoint,
        v1: PixelPoint,
        v2: PixelPoint,
        buffer: &mut FrameBuffer,
        color: u32,
    ) {
        let height = v2.y - v0.y;
        if height <= 0 {
            return;
        }

        let inv_slope_1 = (v1.x - v0.x) as f32 / height as f32;
        let inv_slope_2 = (v2.x - v0.x) as f32 / height as f32;

        let y_first = v0.y.max(0);
        let y_last = v2.y.min(buffer.height() as i32 - 1);
        if y_first > y_last {
            return;
        }

        let skipped = (y_first - v0.y) as f32;
        let mut x_start = v0.x as f32 + inv_slope_1 * skipped;
        let mut x_end = v0.x as f32 + inv_slope_2 * skipped;

        for y in y_first..=y_last {
            buffer.fill_scanline(y, x_start.round() as i32, x_end.round() as i32, color);
            x_start += inv_slope_1;
            x_end += inv_slope_2;
        }
    }

    /// Fills a triangle with `v0`, `v1` on the same top row and its apex `v2`
    /// at the bottom. The sweep runs upward from the apex.
    ///
    /// ```text
    ///   v0______v1
    ///     \    /
    ///      \  /
    ///       \/
    ///       v2
    /// ```
    fn fill_flat_top(
        v0: PixelPoint,
        v1: PixelPoint,
        v2: PixelPoint,
        buffer: &mut FrameBuffer,
        color: u32,
    ) {
        let height = v2.y - v0.y;
        if height <= 0 {
            return;
        }

        let inv_slope_1 = (v2.x - v0.x) as f32 / height as f32;
        let inv_slope_2 = (v2.x - v1.x) as f32 / height as f32;

        let y_first = v0.y.max(0);
        let y_last = v2.y.min(buffer.height() as i32 - 1);
        if y_first > y_last {
            return;
        }

        let skipped = (v2.y - y_last) as f32;
        let mut x_start = v2.x as f32 - inv_slope_1 * skipped;
        let mut x_end = v2.x as f32 - inv_slope_2 * skipped;

        for y in (y_first..=y_last).rev() {
            buffer.fill_scanline(y, x_start.round() as i32, x_end.round() as i32, color);
            x_start -= inv_slope_1;
            x_end -= inv_slope_2;
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32) {
        if !triangle.is_drawable() {
            log::trace!("skipping non-finite triangle {:?}", triangle.points);
            return;
        }

        let [mut v0, mut v1, mut v2] = triangle.points.map(PixelPoint::from_vec2);
        Self::sort_vertices(&mut v0, &mut v1, &mut v2);

        // Zero height: only the degenerate span is left to draw.
        if v0.y == v2.y {
            let left = v0.x.min(v1.x).min(v2.x);
            let right = v0.x.max(v1.x).max(v2.x);
            buffer.fill_scanline(v0.y, left, right, color);
            return;
        }

        if v1.y == v2.y {
            Self::fill_flat_bottom(v0, v1, v2, buffer, color);
            return;
        }

        if v0.y == v1.y {
            Self::fill_flat_top(v0, v1, v2, buffer, color);
            return;
        }

        let split = Self::split_point(v0, v1, v2);
        Self::fill_flat_bottom(v0, v1, split, buffer, color);
        Self::fill_flat_top(v1, split, v2, buffer, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: u32 = 0xFFFFFFFF;

    fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Triangle {
        Triangle::new(
            [Vec2::new(a.0, a.1), Vec2::new(b.0, b.1), Vec2::new(c.0, c.1)],
            None,
        )
    }

    fn rasterize(triangle: &Triangle, width: u32, height: u32) -> Vec<u32> {
        let mut pixels = vec![0u32; (width * height) as usize];
        let mut fb = FrameBuffer::new(&mut pixels, width, height);
        ScanlineRasterizer::new().fill_triangle(triangle, &mut fb, FILL);
        pixels
    }

    fn painted_rows(pixels: &[u32], width: u32) -> Vec<usize> {
        pixels
            .chunks(width as usize)
            .enumerate()
            .filter(|(_, row)| row.contains(&FILL))
            .map(|(y, _)| y)
            .collect()
    }

    fn painted_count(pixels: &[u32]) -> usize {
        pixels.iter().filter(|&&p| p == FILL).count()
    }

    #[test]
    fn sort_orders_every_permutation() {
        let sets = [
            [(5, 1), (2, 2), (9, 3)],
            [(0, 4), (1, 4), (2, 1)],
            [(3, 7), (3, 7), (3, 7)],
        ];
        let permutations = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for set in &sets {
            for perm in &permutations {
                let p = |i: usize| PixelPoint {
                    x: set[perm[i]].0,
                    y: set[perm[i]].1,
                };
                let (mut v0, mut v1, mut v2) = (p(0), p(1), p(2));
                ScanlineRasterizer::sort_vertices(&mut v0, &mut v1, &mut v2);
                assert!(v0.y <= v1.y && v1.y <= v2.y);

                // Sorting again changes nothing.
                let sorted = (v0, v1, v2);
                ScanlineRasterizer::sort_vertices(&mut v0, &mut v1, &mut v2);
                assert_eq!((v0, v1, v2), sorted);
            }
        }
    }

    #[test]
    fn flat_bottom_fills_expected_pixels() {
        let pixels = rasterize(&tri((10.0, 10.0), (0.0, 20.0), (20.0, 20.0)), 32, 32);
        // Row 10 + k spans 2k + 1 pixels.
        assert_eq!(painted_count(&pixels), 121);
        assert_eq!(painted_rows(&pixels, 32), (10..=20).collect::<Vec<_>>());
    }

    #[test]
    fn flat_top_fills_expected_pixels() {
        let pixels = rasterize(&tri((0.0, 10.0), (20.0, 10.0), (10.0, 20.0)), 32, 32);
        assert_eq!(painted_count(&pixels), 121);
        assert_eq!(painted_rows(&pixels, 32), (10..=20).collect::<Vec<_>>());
    }

    #[test]
    fn general_triangles_cover_every_row_between_min_and_max_y() {
        let triangles = [
            tri((10.0, 0.0), (0.0, 10.0), (30.0, 20.0)),
            tri((30.0, 20.0), (10.0, 0.0), (0.0, 10.0)),
            tri((5.0, 3.0), (60.0, 17.0), (20.0, 58.0)),
            tri((1.0, 1.0), (2.0, 62.0), (3.0, 30.0)),
            tri((63.0, 0.0), (0.0, 63.0), (40.0, 40.0)),
        ];

        for triangle in &triangles {
            let pixels = rasterize(triangle, 64, 64);
            let ys = triangle.points.map(|p| p.y as usize);
            let min_y = *ys.iter().min().unwrap();
            let max_y = *ys.iter().max().unwrap();
            assert_eq!(
                painted_rows(&pixels, 64),
                (min_y..=max_y).collect::<Vec<_>>(),
                "triangle {:?}",
                triangle.points
            );
        }
    }

    #[test]
    fn vertex_order_does_not_change_coverage() {
        let a = rasterize(&tri((5.0, 3.0), (60.0, 17.0), (20.0, 58.0)), 64, 64);
        let b = rasterize(&tri((20.0, 58.0), (5.0, 3.0), (60.0, 17.0)), 64, 64);
        assert_eq!(a, b);
    }

    #[test]
    fn horizontal_degenerate_draws_single_span() {
        let pixels = rasterize(&tri((0.0, 5.0), (10.0, 5.0), (4.0, 5.0)), 16, 16);
        assert_eq!(painted_rows(&pixels, 16), vec![5]);
        assert_eq!(painted_count(&pixels), 11);
    }

    #[test]
    fn collinear_diagonal_does_not_divide_by_zero() {
        let pixels = rasterize(&tri((0.0, 0.0), (5.0, 5.0), (10.0, 10.0)), 16, 16);
        assert_eq!(painted_rows(&pixels, 16), (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn non_finite_triangles_are_skipped() {
        let pixels = rasterize(&tri((0.0, 0.0), (f32::NAN, 5.0), (10.0, 10.0)), 16, 16);
        assert_eq!(painted_count(&pixels), 0);

        let pixels = rasterize(&tri((0.0, 0.0), (f32::INFINITY, 5.0), (10.0, 10.0)), 16, 16);
        assert_eq!(painted_count(&pixels), 0);
    }

    #[test]
    fn oversized_triangle_is_clipped_to_buffer() {
        let triangle = tri((-30000.0, -30000.0), (30000.0, -30000.0), (0.0, 30000.0));
        let pixels = rasterize(&triangle, 10, 10);
        assert_eq!(painted_count(&pixels), 100);
    }

    #[test]
    fn far_vertex_keeps_visible_part() {
        let triangle = tri((100.0, 100.0), (300.0, 100.0), (40000.0, 500.0));
        let pixels = rasterize(&triangle, 800, 600);

        // The left edge leaves the buffer after 7 rows.
        assert_eq!(painted_rows(&pixels, 800), (100..=107).collect::<Vec<_>>());
        let top_row = &pixels[100 * 800..101 * 800];
        assert_eq!(painted_count(top_row), 201);
        assert_eq!(top_row[100], FILL);
        assert_eq!(top_row[300], FILL);
    }

    #[test]
    fn astronomically_far_vertex_is_clamped() {
        let triangle = tri((2.0, 2.0), (12.0, 2.0), (1.0e30, 1.0e30));
        let pixels = rasterize(&triangle, 16, 16);
        assert!(painted_count(&pixels) > 0);
        assert_eq!(painted_rows(&pixels, 16)[0], 2);
    }

    #[test]
    fn offscreen_triangle_draws_nothing() {
        let pixels = rasterize(&tri((100.0, 100.0), (120.0, 100.0), (110.0, 130.0)), 16, 16);
        assert_eq!(painted_count(&pixels), 0);
    }
}

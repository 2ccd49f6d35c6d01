//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! basic drawing operations like lines, rectangles, and wireframes.

use super::framebuffer::FrameBuffer;
use super::rasterizer::{clamp_coord, Triangle};
use crate::math::vec2::Vec2;

/// Side length in pixels of the square drawn on each vertex.
pub const VERTEX_MARKER_SIZE: i32 = 6;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32, clear_color: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![clear_color; size],
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

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.width as usize + x as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Draws a dot every `spacing` pixels in both directions.
    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        if spacing <= 0 {
            return;
        }
        let step = spacing as usize;
        let width = self.width as usize;
        for y in (0..self.height as usize).step_by(step) {
            for x in (0..width).step_by(step) {
                self.color_buffer[width * y + x] = color;
            }
        }
    }

    /// Fills the part of the rectangle that lies inside the buffer.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        let x_start = x.max(0);
        let x_end = x.saturating_add(width).min(self.width as i32);
        let y_start = y.max(0);
        let y_end = y.saturating_add(height).min(self.height as i32);

        for row in y_start..y_end {
            for column in x_start..x_end {
                self.set_pixel(column, row, color);
            }
        }
    }

    /// Draws a square marker centered on each vertex of `triangle`.
    pub fn draw_triangle_vertices(&mut self, triangle: &Triangle, color: u32) {
        if !triangle.is_drawable() {
            return;
        }
        let half = VERTEX_MARKER_SIZE / 2;
        for point in &triangle.points {
            self.draw_rect(
                clamp_coord(point.x).round() as i32 - half,
                clamp_coord(point.y).round() as i32 - half,
                VERTEX_MARKER_SIZE,
                VERTEX_MARKER_SIZE,
                color,
            );
        }
    }

    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: u32) {
        if !triangle.is_drawable() {
            return;
        }
        let [p0, p1, p2] = triangle.points;

        self.draw_segment(p0, p1, color);
        self.draw_segment(p1, p2, color);
        self.draw_segment(p2, p0, color);
    }

    /// Draws the part of the segment `a`-`b` that lies inside the buffer.
    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: u32) {
        let Some((a, b)) = clip_segment(a, b, self.width, self.height) else {
            return;
        };
        self.draw_bresenham(
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
            color,
        );
    }

    /// Draws a line between two points, clipped to the buffer.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        self.draw_segment(
            Vec2::new(x0 as f32, y0 as f32),
            Vec2::new(x1 as f32, y1 as f32),
            color,
        );
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    /// Both endpoints are expected to be inside the buffer.
    ///
    /// The algorithm tracks an error term holding the distance between the
    /// ideal line and the current pixel. Each step moves along the major axis
    /// and also along the minor axis once the accumulated error crosses the
    /// threshold, using only integer arithmetic.
    fn draw_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;

            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }

            // Both branches may run, giving a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// The color buffer as ARGB8888 bytes, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }
}

/// Liang-Barsky clipping of the segment `a`-`b` against the pixel rectangle
/// `[0, width - 1] x [0, height - 1]`. Endpoints already inside come back
/// unchanged.
fn clip_segment(a: Vec2, b: Vec2, width: u32, height: u32) -> Option<(Vec2, Vec2)> {
    if width == 0 || height == 0 {
        return None;
    }
    let x_max = (width - 1) as f32;
    let y_max = (height - 1) as f32;
    let d = b - a;

    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    for (p, q) in [(-d.x, a.x), (d.x, x_max - a.x), (-d.y, a.y), (d.y, y_max - a.y)] {
        if p == 0.0 {
            // Parallel to this edge.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    let at = |t: f32| Vec2::new(a.x + d.x * t, a.y + d.y * t);
    let start = if t_enter > 0.0 { at(t_enter) } else { a };
    let end = if t_exit < 1.0 { at(t_exit) } else { b };
    Some((start, end))
}

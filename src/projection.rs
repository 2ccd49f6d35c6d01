//! Projection from camera space to the 2D image plane.
//!
//! The projected point is centered on the origin; callers shift it into pixel
//! coordinates afterwards (see [`crate::pipeline::to_screen`]).

use crate::math::{vec2::Vec2, vec3::Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `(f * x / z, f * y / z)`. Points farther away shrink toward the center.
    Perspective { fov_factor: f32 },
    /// `(f * x, f * y)`. Depth is ignored.
    Orthographic { fov_factor: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov_factor: crate::config::DEFAULT_FOV_FACTOR,
        }
    }
}

impl Projection {
    pub fn fov_factor(&self) -> f32 {
        match *self {
            Projection::Perspective { fov_factor } | Projection::Orthographic { fov_factor } => {
                fov_factor
            }
        }
    }

    /// Projects `point` onto the image plane.
    ///
    /// There is no near-plane clipping. A point with `z == 0` yields infinite
    /// or NaN coordinates and a point behind the camera (`z < 0`) is mirrored;
    /// both follow IEEE-754 float division, so the result is always defined.
    /// The rasterizer skips triangles with non-finite coordinates.
    #[inline]
    pub fn project(&self, point: Vec3) -> Vec2 {
        match *self {
            Projection::Perspective { fov_factor } => Vec2::new(
                (fov_factor * point.x) / point.z,
                (fov_factor * point.y) / point.z,
            ),
            Projection::Orthographic { fov_factor } => {
                Vec2::new(fov_factor * point.x, fov_factor * point.y)
            }
        }
    }
}

//! Engine settings.
//!
//! All tunables live in [`EngineConfig`]; the defaults reproduce the classic
//! spinning-cube demo: 30 FPS, the mesh pushed 5 units in front of a camera
//! at the origin, and a projection scale of 640. The binary replaces the
//! 800x600 buffer size with the desktop size through [`EngineConfig::with_size`].

use std::time::Duration;

use crate::math::vec3::Vec3;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u32 = 30;

pub const DEFAULT_FOV_FACTOR: f32 = 640.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;
pub const DEFAULT_ROTATION_STEP: f32 = 0.01;
pub const DEFAULT_GRID_SPACING: i32 = 10;

/// Colors in ARGB8888 format.
pub mod colors {
    pub const BACKGROUND: u32 = 0xFF000000;
    pub const GRID: u32 = 0xFF444444;
    pub const FILL: u32 = 0xFF555555;
    pub const WIREFRAME: u32 = 0xFFFFFFFF;
    pub const VERTEX: u32 = 0xFFFF0000;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: u32,
    pub grid: u32,
    pub fill: u32,
    pub wireframe: u32,
    pub vertex: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            grid: colors::GRID,
            fill: colors::FILL,
            wireframe: colors::WIREFRAME,
            vertex: colors::VERTEX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Scale applied to x and y during projection.
    pub fov_factor: f32,
    pub camera_position: Vec3,
    /// Distance along +z the mesh is pushed after rotation.
    pub camera_distance: f32,
    /// Radians added to each rotation axis per frame.
    pub rotation_step: f32,
    /// Background grid spacing in pixels, `None` to disable the grid.
    pub grid_spacing: Option<i32>,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            fov_factor: DEFAULT_FOV_FACTOR,
            camera_position: Vec3::ZERO,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            rotation_step: DEFAULT_ROTATION_STEP,
            grid_spacing: Some(DEFAULT_GRID_SPACING),
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    /// Same defaults with a different pixel buffer size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Time budget for one frame. A zero FPS disables pacing.
    pub fn frame_target_time(&self) -> Duration {
        if self.fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / self.fps as f64)
        }
    }
}

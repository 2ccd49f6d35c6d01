//! A CPU-based software 3D rasterizer.
//!
//! A mesh is rotated every frame, pushed in front of the camera, backface
//! culled, projected and filled scanline by scanline into a pixel buffer. SDL2
//! is used only to show that buffer and to read keyboard input.
//!
//! # Quick Start
//!
//! ```ignore
//! use scanliner::prelude::*;
//!
//! let mut window = Window::new("My App")?;
//! let config = EngineConfig::with_size(window.width(), window.height());
//! let mut engine = Engine::new(config);
//! engine.update()?;
//! engine.render();
//! window.present(engine.frame_buffer())?;
//! ```

// Public API - exposed to library consumers
pub mod buffer;
pub mod config;
pub mod engine;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use buffer::{BufferError, DynamicBuffer};
pub use config::EngineConfig;
pub use engine::{Engine, RenderMode};
pub use mesh::{Face, LoadError, Mesh};
pub use pipeline::CullMode;
pub use projection::Projection;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use scanliner::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{EngineConfig, Palette};
    pub use crate::engine::{Engine, RenderMode};
    pub use crate::mesh::{Face, LoadError, Mesh};
    pub use crate::pipeline::CullMode;
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Window & Input
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle};
}

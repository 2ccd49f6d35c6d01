//! Core rendering engine.
//!
//! The [`Engine`] struct is the application context: it owns the mesh, the
//! per-frame triangle list and the pixel buffer, and runs the geometry
//! pipeline and the rasterizer once per frame.

use crate::buffer::{BufferError, DynamicBuffer};
use crate::config::EngineConfig;
use crate::math::vec3::Vec3;
use crate::mesh::{LoadError, Mesh};
use crate::pipeline::{self, CullMode};
use crate::projection::Projection;
use crate::render::{Rasterizer, Renderer, ScanlineRasterizer, Triangle};
use crate::window::{Key, WindowEvent};

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Wireframe + vertices (key: 1)
    WireframeVertices,
    /// Wireframe only (key: 2)
    #[default]
    Wireframe,
    /// Filled only (key: 3)
    Filled,
    /// Filled + wireframe (key: 4)
    FilledWireframe,
}

impl RenderMode {
    fn layers(self) -> (bool, bool, bool) {
        // (filled, wireframe, vertices)
        match self {
            RenderMode::WireframeVertices => (false, true, true),
            RenderMode::Wireframe => (false, true, false),
            RenderMode::Filled => (true, false, false),
            RenderMode::FilledWireframe => (true, true, false),
        }
    }
}

pub struct Engine {
    config: EngineConfig,
    renderer: Renderer,
    rasterizer: ScanlineRasterizer,
    triangles_to_render: DynamicBuffer<Triangle>,
    mesh: Mesh,
    render_mode: RenderMode,
    cull_mode: CullMode,
    projection: Projection,
}

impl Engine {
    /// Creates an engine showing the built-in cube.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            renderer: Renderer::new(config.width, config.height, config.palette.background),
            rasterizer: ScanlineRasterizer::new(),
            triangles_to_render: DynamicBuffer::new(),
            mesh: Mesh::cube(),
            render_mode: RenderMode::default(),
            cull_mode: CullMode::default(),
            projection: Projection::Perspective {
                fov_factor: config.fov_factor,
            },
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// Replaces the mesh with the contents of an OBJ file. On error the
    /// current mesh is kept.
    pub fn load_mesh(&mut self, file_path: &str) -> Result<(), LoadError> {
        self.mesh = Mesh::from_obj(file_path)?;
        Ok(())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Applies one input event. Returns false when the loop should stop.
    pub fn handle_event(&mut self, event: WindowEvent) -> bool {
        let key = match event {
            WindowEvent::None => return true,
            WindowEvent::Quit => return false,
            WindowEvent::KeyDown(key) => key,
        };

        match key {
            Key::Escape => return false,
            Key::Num1 => self.set_render_mode(RenderMode::WireframeVertices),
            Key::Num2 => self.set_render_mode(RenderMode::Wireframe),
            Key::Num3 => self.set_render_mode(RenderMode::Filled),
            Key::Num4 => self.set_render_mode(RenderMode::FilledWireframe),
            Key::C => self.set_cull_mode(CullMode::Backface),
            Key::D => self.set_cull_mode(CullMode::None),
        }

        log::debug!(
            "render mode {:?}, cull mode {:?}",
            self.render_mode,
            self.cull_mode
        );
        true
    }

    /// Advances the mesh rotation and rebuilds the frame triangle list.
    pub fn update(&mut self) -> Result<(), BufferError> {
        let step = self.config.rotation_step;
        self.mesh.rotate(Vec3::new(step, step, step));

        self.triangles_to_render.clear();
        let culled = pipeline::build_frame(
            &self.mesh,
            &self.config,
            self.cull_mode,
            self.projection,
            &mut self.triangles_to_render,
        )?;

        log::trace!(
            "frame: {} triangles, {} culled",
            self.triangles_to_render.len(),
            culled
        );
        Ok(())
    }

    /// Draws the frame triangle list into the pixel buffer, then releases it.
    ///
    /// Triangles are drawn one at a time in list order, each with all the
    /// layers of the render mode, so a later fill covers earlier outlines.
    pub fn render(&mut self) {
        let palette = self.config.palette;
        self.renderer.clear(palette.background);

        if let Some(spacing) = self.config.grid_spacing {
            self.renderer.draw_grid(spacing, palette.grid);
        }

        let (draw_filled, draw_wireframe, draw_vertices) = self.render_mode.layers();

        for triangle in &self.triangles_to_render {
            if draw_filled {
                let color = triangle.color.unwrap_or(palette.fill);
                let mut fb = self.renderer.as_framebuffer();
                self.rasterizer.fill_triangle(triangle, &mut fb, color);
            }
            if draw_wireframe {
                self.renderer
                    .draw_triangle_wireframe(triangle, palette.wireframe);
            }
            if draw_vertices {
                self.renderer.draw_triangle_vertices(triangle, palette.vertex);
            }
        }

        self.triangles_to_render.free();
    }
}

//! Pixel output: the color buffer, drawing primitives and triangle filling.

mod framebuffer;
pub(crate) mod rasterizer;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{Rasterizer, ScanlineRasterizer, Triangle};
pub use renderer::Renderer;

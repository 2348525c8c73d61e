use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

use pixels::Pixels;

/// Headful presenter built on `pixels`.
///
/// The pixel buffer stays at the fixed canvas size for the whole session;
/// window resizes only retarget the surface, and `pixels` scales the canvas
/// up with its aspect preserved, black bars filling the rest. Scene code
/// draws through `Renderer2d` and never sees the window size.
pub struct PixelsPresenter {
    pixels: Pixels,
    canvas: SurfaceSize,
}

impl PixelsPresenter {
    pub fn new(mut pixels: Pixels, canvas: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(canvas.width, canvas.height)?;
        Ok(Self { pixels, canvas })
    }

    pub fn canvas(&self) -> SurfaceSize {
        self.canvas
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut Pixels {
        &mut self.pixels
    }

    /// Follows a window resize. The canvas buffer is untouched.
    pub fn resize_window(&mut self, width: u32, height: u32) -> Result<(), pixels::Error> {
        if width == 0 || height == 0 {
            // Minimized windows report zero sizes; presenting is pointless
            // until a real size arrives.
            return Ok(());
        }
        Ok(self.pixels.resize_surface(width, height)?)
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.canvas);
        cpu.begin_frame(self.canvas);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

use crate::{surface::SurfaceSize, ui::Rect};

/// Letterbox mapping between a fixed-size canvas and a host window.
///
/// The canvas is scaled by the smaller of the two axis ratios and centered,
/// so it always fits entirely inside the window with its aspect preserved.
/// Pointer positions arrive in window coordinates and game logic wants
/// canvas coordinates; this type owns that conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas: SurfaceSize,
    host: SurfaceSize,
}

impl Viewport {
    pub fn new(canvas: SurfaceSize, host: SurfaceSize) -> Self {
        Self { canvas, host }
    }

    pub fn canvas(&self) -> SurfaceSize {
        self.canvas
    }

    pub fn host(&self) -> SurfaceSize {
        self.host
    }

    pub fn set_host(&mut self, host: SurfaceSize) {
        self.host = host;
    }

    /// Uniform canvas-to-window scale factor. Zero when either side is empty.
    pub fn scale(&self) -> f32 {
        if self.canvas.is_empty() || self.host.is_empty() {
            return 0.0;
        }
        let sx = self.host.width as f32 / self.canvas.width as f32;
        let sy = self.host.height as f32 / self.canvas.height as f32;
        sx.min(sy)
    }

    fn offset(&self) -> (f32, f32) {
        let s = self.scale();
        let ox = (self.host.width as f32 - self.canvas.width as f32 * s) / 2.0;
        let oy = (self.host.height as f32 - self.canvas.height as f32 * s) / 2.0;
        (ox.max(0.0), oy.max(0.0))
    }

    /// Where the scaled canvas lands inside the window.
    pub fn dest_rect(&self) -> Rect {
        let s = self.scale();
        let (ox, oy) = self.offset();
        Rect::new(
            ox.round() as u32,
            oy.round() as u32,
            (self.canvas.width as f32 * s).round() as u32,
            (self.canvas.height as f32 * s).round() as u32,
        )
    }

    /// Maps a window position to canvas coordinates, clamped to the canvas.
    /// Positions in the letterbox bars land on the nearest canvas edge.
    pub fn window_to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        let s = self.scale();
        if s <= 0.0 {
            return (0.0, 0.0);
        }
        let (ox, oy) = self.offset();
        let cx = ((x - ox) / s).clamp(0.0, self.canvas.width as f32);
        let cy = ((y - oy) / s).clamp(0.0, self.canvas.height as f32);
        (cx, cy)
    }

    /// Inverse of [`window_to_canvas`](Self::window_to_canvas) for positions
    /// inside the canvas.
    pub fn canvas_to_window(&self, x: f32, y: f32) -> (f32, f32) {
        let s = self.scale();
        let (ox, oy) = self.offset();
        (ox + x * s, oy + y * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(cw: u32, ch: u32, hw: u32, hh: u32) -> Viewport {
        Viewport::new(SurfaceSize::new(cw, ch), SurfaceSize::new(hw, hh))
    }

    #[test]
    fn scale_uses_smaller_axis_ratio() {
        let v = vp(800, 800, 1920, 1080);
        assert!((v.scale() - 1.35).abs() < 1e-6);

        let v = vp(800, 800, 400, 400);
        assert!((v.scale() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn dest_rect_is_centered() {
        let v = vp(800, 800, 1920, 1080);
        assert_eq!(v.dest_rect(), Rect::new(420, 0, 1080, 1080));
    }

    #[test]
    fn window_to_canvas_round_trips_interior_points() {
        let v = vp(800, 800, 1920, 1080);
        let (wx, wy) = v.canvas_to_window(400.0, 400.0);
        let (cx, cy) = v.window_to_canvas(wx, wy);
        assert!((cx - 400.0).abs() < 1e-3);
        assert!((cy - 400.0).abs() < 1e-3);
    }

    #[test]
    fn window_to_canvas_clamps_letterbox_bars() {
        let v = vp(800, 800, 1920, 1080);
        // Left bar maps to the canvas left edge.
        assert_eq!(v.window_to_canvas(10.0, 540.0).0, 0.0);
        // Beyond the right bar maps to the canvas right edge.
        assert_eq!(v.window_to_canvas(1919.0, 540.0).0, 800.0);
    }

    #[test]
    fn degenerate_host_yields_zero_scale() {
        let v = vp(800, 800, 0, 600);
        assert_eq!(v.scale(), 0.0);
        assert_eq!(v.window_to_canvas(100.0, 100.0), (0.0, 0.0));
    }
}

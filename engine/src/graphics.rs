use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// Built-in block font. 3x5 glyphs, scaled by integer factors.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of `text` when drawn at `scale` (single line).
pub fn text_width(text: &str, scale: u32) -> u32 {
    (text.chars().count() as u32).saturating_mul(glyph_advance_x(scale))
}

/// 2D drawing interface.
///
/// Scene code talks only to this trait; the backing store can be a window
/// frame or a plain byte buffer in tests.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (`alpha` applies to `color`).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);

    /// Opaque filled disc centered at (`cx`, `cy`). Signed center so shapes
    /// can hang partially off-canvas and still clip correctly.
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer over an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn frame_fits(&self) -> bool {
        let expected = self.size.rgba_len();
        expected > 0 && self.frame.len() >= expected
    }

    fn stride(&self) -> usize {
        (self.size.width as usize).saturating_mul(4)
    }

    /// Fills one clipped horizontal span on row `y`, from `x0` to `x1`
    /// inclusive, in signed coordinates.
    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y >= self.size.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.size.width as i32 - 1);
        if x0 > x1 || !self.frame_fits() {
            return;
        }

        let stride = self.stride();
        let start = (y as usize) * stride + (x0 as usize) * 4;
        let end = start + ((x1 - x0 + 1) as usize) * 4;
        let [r, g, b, a] = color;
        for px in self.frame[start..end].chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }
        for y in rect.y..max_y {
            self.fill_span(y as i32, rect.x as i32, max_x as i32 - 1, color);
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }

        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y || !self.frame_fits() {
            return;
        }

        let a = alpha as u32;
        let inv = 255u32 - a;
        let stride = self.stride();
        let row_bytes = ((max_x - rect.x) as usize) * 4;
        let mut row_start = (rect.y as usize) * stride + (rect.x as usize) * 4;

        for _ in rect.y..max_y {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                let r0 = px[0] as u32;
                let g0 = px[1] as u32;
                let b0 = px[2] as u32;

                px[0] = ((r0 * inv + (color[0] as u32) * a + 127) / 255) as u8;
                px[1] = ((g0 * inv + (color[1] as u32) * a + 127) / 255) as u8;
                px[2] = ((b0 * inv + (color[2] as u32) * a + 127) / 255) as u8;
                px[3] = 255;
            }
            row_start += stride;
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }

        let x1 = rect.x.saturating_add(rect.w).min(self.size.width);
        let y1 = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }

        let w = x1 - rect.x;
        let h = y1 - rect.y;

        // Top / bottom.
        self.fill_rect(Rect::new(rect.x, rect.y, w, 1), color);
        if h > 1 {
            self.fill_rect(Rect::new(rect.x, y1 - 1, w, 1), color);
        }

        // Left / right.
        self.fill_rect(Rect::new(rect.x, rect.y, 1, h), color);
        if w > 1 {
            self.fill_rect(Rect::new(x1 - 1, rect.y, 1, h), color);
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        if radius == 0 {
            return;
        }
        let r = radius.min(i32::MAX as u32) as i64;
        let rr = r * r;
        for dy in -r..=r {
            let y = cy as i64 + dy;
            if y < 0 || y >= self.size.height as i64 {
                continue;
            }
            let half = ((rr - dy * dy) as f64).sqrt() as i64;
            let x0 = (cx as i64 - half).clamp(i32::MIN as i64, i32::MAX as i64);
            let x1 = (cx as i64 + half).clamp(i32::MIN as i64, i32::MAX as i64);
            self.fill_span(y as i32, x0 as i32, x1 as i32, color);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let width = self.size.width;
        let height = self.size.height;
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= height {
                        break;
                    }
                    continue;
                }
                ' ' => {
                    cursor_x = cursor_x.saturating_add(adv_x);
                    if cursor_x >= width {
                        break;
                    }
                    continue;
                }
                _ => {}
            }

            draw_char(self.frame, width, height, cursor_x, cursor_y, ch, color, scale);
            cursor_x = cursor_x.saturating_add(adv_x);
            if cursor_x >= width {
                break;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_char(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    ch: char,
    color: Color,
    scale: u32,
) {
    let rows = glyph_rows(ch);
    for (row, bits) in rows.into_iter().enumerate() {
        let py0 = y.saturating_add((row as u32).saturating_mul(scale));
        for col in 0..GLYPH_W {
            let mask = 1u8 << (GLYPH_W - 1 - col);
            if (bits & mask) == 0 {
                continue;
            }
            let px0 = x.saturating_add(col.saturating_mul(scale));
            for dy in 0..scale {
                for dx in 0..scale {
                    put_pixel(frame, width, height, px0 + dx, py0 + dy, color);
                }
            }
        }
    }
}

fn put_pixel(frame: &mut [u8], width: u32, height: u32, x: u32, y: u32, color: Color) {
    if x >= width || y >= height {
        return;
    }
    let idx = ((y * width + x) * 4) as usize;
    if idx + 4 <= frame.len() {
        let [r, g, b, a] = color;
        frame[idx] = r;
        frame[idx + 1] = g;
        frame[idx + 2] = b;
        frame[idx + 3] = a;
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    let c = ch.to_ascii_uppercase();
    match c {
        // Digits
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        // Letters
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        // Punctuation
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> &[u8] {
        let idx = ((y * width + x) * 4) as usize;
        &frame[idx..idx + 4]
    }

    #[test]
    fn fill_rect_clips_to_canvas() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        gfx.fill_rect(Rect::new(2, 2, 10, 10), [9, 8, 7, 255]);

        assert_eq!(pixel(&frame, 4, 2, 2), &[9, 8, 7, 255]);
        assert_eq!(pixel(&frame, 4, 3, 3), &[9, 8, 7, 255]);
        assert_eq!(pixel(&frame, 4, 1, 1), &[0, 0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_with_existing_pixels() {
        let size = SurfaceSize::new(2, 1);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        gfx.fill_rect(Rect::new(0, 0, 2, 1), [200, 0, 0, 255]);
        gfx.blend_rect(Rect::new(0, 0, 1, 1), [0, 0, 0, 255], 128);

        // Left pixel darkened, right untouched.
        assert!(frame[0] < 200);
        assert_eq!(pixel(&frame, 2, 1, 0), &[200, 0, 0, 255]);
    }

    #[test]
    fn fill_circle_covers_center_and_cardinal_extremes() {
        let size = SurfaceSize::new(11, 11);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        gfx.fill_circle(5, 5, 2, [255, 255, 255, 255]);

        assert_eq!(pixel(&frame, 11, 5, 5), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 11, 3, 5), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 11, 7, 5), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 11, 5, 3), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 11, 5, 7), &[255, 255, 255, 255]);
        // Corner of the bounding box stays empty.
        assert_eq!(pixel(&frame, 11, 3, 3), &[0, 0, 0, 0]);
    }

    #[test]
    fn fill_circle_clips_at_negative_coordinates() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        // Center fully off-canvas to the top-left; only the lower-right
        // quarter can land.
        gfx.fill_circle(-1, -1, 3, [10, 20, 30, 255]);

        assert_eq!(pixel(&frame, 4, 0, 0), &[10, 20, 30, 255]);
        assert_eq!(pixel(&frame, 4, 3, 3), &[0, 0, 0, 0]);
    }

    #[test]
    fn rect_outline_leaves_interior_untouched() {
        let size = SurfaceSize::new(5, 5);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        gfx.rect_outline(Rect::new(0, 0, 5, 5), [1, 2, 3, 255]);

        assert_eq!(pixel(&frame, 5, 0, 0), &[1, 2, 3, 255]);
        assert_eq!(pixel(&frame, 5, 4, 4), &[1, 2, 3, 255]);
        assert_eq!(pixel(&frame, 5, 2, 2), &[0, 0, 0, 0]);
    }

    #[test]
    fn draw_text_marks_glyph_pixels() {
        let size = SurfaceSize::new(16, 8);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);

        gfx.draw_text_scaled(0, 0, "I", [255, 255, 255, 255], 1);

        // Top row of 'I' is fully set.
        assert_eq!(pixel(&frame, 16, 0, 0), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 16, 1, 0), &[255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 16, 2, 0), &[255, 255, 255, 255]);
        // Second row only has the stem.
        assert_eq!(pixel(&frame, 16, 0, 1), &[0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 16, 1, 1), &[255, 255, 255, 255]);
    }

    #[test]
    fn text_width_counts_glyph_advances() {
        assert_eq!(text_width("RINK", 1), 4 * 4);
        assert_eq!(text_width("RINK", 3), 4 * 12);
    }
}

use engine::graphics::{CpuRenderer, Renderer2d, text_width};
use engine::regression::rgba_sha256_hex;
use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Rect};

fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * width + x) * 4) as usize;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

#[test]
fn clear_covers_every_pixel() {
    let size = SurfaceSize::new(32, 16);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);

    gfx.clear([29, 29, 27, 255]);

    assert_eq!(pixel(&frame, 32, 0, 0), [29, 29, 27, 255]);
    assert_eq!(pixel(&frame, 32, 31, 15), [29, 29, 27, 255]);
    assert_eq!(pixel(&frame, 32, 16, 8), [29, 29, 27, 255]);
}

#[test]
fn circle_over_background_keeps_outside_pixels() {
    let size = SurfaceSize::new(64, 64);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);

    gfx.clear([20, 160, 133, 255]);
    gfx.fill_circle(32, 32, 10, [243, 216, 63, 255]);

    assert_eq!(pixel(&frame, 64, 32, 32), [243, 216, 63, 255]);
    assert_eq!(pixel(&frame, 64, 2, 2), [20, 160, 133, 255]);
    // Just outside the radius on the horizontal axis.
    assert_eq!(pixel(&frame, 64, 44, 32), [20, 160, 133, 255]);
}

#[test]
fn centered_text_lands_inside_its_anchor_rect() {
    let size = SurfaceSize::new(200, 60);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);

    let label = "PLAY";
    let scale = 2;
    let w = text_width(label, scale);
    let area = Rect::from_size(200, 60);
    let text_rect = area.place(engine::ui::Size::new(w, 12), Anchor::Center);

    gfx.draw_text_scaled(text_rect.x, text_rect.y, label, [255, 255, 255, 255], scale);

    let mut lit = 0usize;
    for y in 0..60 {
        for x in 0..200 {
            if pixel(&frame, 200, x, y) != [0, 0, 0, 0] {
                assert!(
                    text_rect.contains(x, y),
                    "glyph pixel ({x}, {y}) escaped {text_rect:?}"
                );
                lit += 1;
            }
        }
    }
    assert!(lit > 0, "expected glyph pixels to be drawn");
}

#[test]
fn identical_scenes_hash_identically() {
    let size = SurfaceSize::new(80, 80);

    let draw = |frame: &mut [u8]| {
        let mut gfx = CpuRenderer::new(frame, size);
        gfx.clear([29, 29, 27, 255]);
        gfx.fill_rect(Rect::new(10, 10, 30, 6), [243, 216, 63, 255]);
        gfx.blend_rect(Rect::new(0, 0, 80, 80), [0, 0, 0, 255], 100);
        gfx.fill_circle(40, 50, 12, [243, 216, 63, 255]);
        gfx.draw_text(8, 64, "RINK", [255, 255, 255, 255]);
    };

    let mut a = vec![0u8; size.rgba_len()];
    let mut b = vec![0u8; size.rgba_len()];
    draw(&mut a);
    draw(&mut b);

    assert_eq!(rgba_sha256_hex(&a), rgba_sha256_hex(&b));

    // A one-pixel change must flip the hash.
    b[0] ^= 1;
    assert_ne!(rgba_sha256_hex(&a), rgba_sha256_hex(&b));
}

use std::fs;
use std::path::PathBuf;

use engine::graphics::{CpuRenderer, Renderer2d};
use engine::regression::{
    FrameHashGolden, assert_or_update_golden_json, load_golden_json, rgba_sha256_hex,
    sanitize_filename,
};
use engine::surface::SurfaceSize;
use engine::ui::Rect;

fn temp_golden(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rink-frame-hash-{}-{name}.json",
        std::process::id()
    ))
}

fn render_frame(seed: u8) -> Vec<u8> {
    let size = SurfaceSize::new(40, 40);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);
    gfx.clear([29, 29, 27, 255]);
    gfx.fill_circle(20, 20, 8 + (seed as u32 % 4), [243, 216, 63, 255]);
    gfx.rect_outline(Rect::new(2, 2, 36, 36), [20, 160, 133, 255]);
    frame
}

#[test]
fn golden_flow_accepts_unchanged_frames() {
    let path = temp_golden("accepts");
    fs::remove_file(&path).ok();

    let hashes: Vec<String> = (0..3).map(|i| rgba_sha256_hex(&render_frame(i))).collect();
    let golden = FrameHashGolden::new("accepts", 40, 40, hashes.clone());

    // First run writes the file; second run must verify against it.
    assert_or_update_golden_json(&path, &golden, false).unwrap();
    let rerun = FrameHashGolden::new("accepts", 40, 40, hashes);
    let result = assert_or_update_golden_json(&path, &rerun, false);
    fs::remove_file(&path).ok();
    result.unwrap();
}

#[test]
fn golden_flow_rejects_changed_frames() {
    let path = temp_golden("rejects");
    fs::remove_file(&path).ok();

    let before = FrameHashGolden::new(
        "rejects",
        40,
        40,
        vec![rgba_sha256_hex(&render_frame(0))],
    );
    assert_or_update_golden_json(&path, &before, false).unwrap();

    let after = FrameHashGolden::new(
        "rejects",
        40,
        40,
        vec![rgba_sha256_hex(&render_frame(1))],
    );
    let err = assert_or_update_golden_json(&path, &after, false).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(err.to_string().contains("golden mismatch"));
}

#[test]
fn update_flag_rewrites_in_place() {
    let path = temp_golden("rewrites");
    fs::remove_file(&path).ok();

    let before = FrameHashGolden::new("rewrites", 40, 40, vec!["old".into()]);
    assert_or_update_golden_json(&path, &before, false).unwrap();

    let after = FrameHashGolden::new("rewrites", 40, 40, vec!["new".into()]);
    assert_or_update_golden_json(&path, &after, true).unwrap();

    let on_disk = load_golden_json(&path).unwrap();
    fs::remove_file(&path).ok();
    assert_eq!(on_disk.hashes, vec!["new".to_string()]);
}

#[test]
fn golden_paths_are_filesystem_safe() {
    assert_eq!(sanitize_filename("options: audio/sfx"), "options__audio_sfx");
    let path = engine::regression_golden_path!("options: audio/sfx");
    assert!(path.ends_with("tests/goldens/options__audio_sfx.json"));
}

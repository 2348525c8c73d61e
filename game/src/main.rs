//! Windowed entry point.
//!
//! All knobs come from `RINK_*` environment variables so the binary needs
//! no CLI parsing; unset or unparsable values fall back to defaults.

use std::error::Error;

use engine::app::AppConfig;
use engine::surface::SurfaceSize;
use winit::dpi::PhysicalSize;

use game::headful;
use game::puck::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use game::settings::{BoundaryPolicy, DemoConfig, DeviceProfile};

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_device(name: &str) -> Option<DeviceProfile> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "desktop" => Some(DeviceProfile::Desktop),
            "touch" | "touchlike" => Some(DeviceProfile::TouchLike),
            _ => None,
        })
}

fn env_boundary(name: &str) -> Option<BoundaryPolicy> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "free" | "freeroam" | "free_roam" => Some(BoundaryPolicy::FreeRoam),
            "contain" | "clamp" => Some(BoundaryPolicy::Contain),
            _ => None,
        })
}

fn env_present_mode(name: &str) -> Option<pixels::wgpu::PresentMode> {
    use pixels::wgpu::PresentMode;

    let v = std::env::var(name).ok()?;
    match v.to_ascii_lowercase().as_str() {
        "auto" | "auto_vsync" | "vsync" => Some(PresentMode::AutoVsync),
        "auto_no_vsync" | "auto_novsync" | "no_vsync" | "novsync" => Some(PresentMode::AutoNoVsync),
        "fifo" => Some(PresentMode::Fifo),
        "mailbox" => Some(PresentMode::Mailbox),
        "immediate" => Some(PresentMode::Immediate),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut config = DemoConfig::default();
    if let Some(device) = env_device("RINK_DEVICE") {
        config.device = device;
    }
    if let Some(boundary) = env_boundary("RINK_BOUNDARY") {
        config.boundary = boundary;
    }
    if let Some(audition) = env_bool("RINK_AUDITION") {
        config.audition_on_change = audition;
    }
    if let Some(seed) = env_u64("RINK_ATTRACT_SEED") {
        config.attract_seed = seed;
    }

    // Open large by default; the window is clamped to the primary monitor
    // and the scene letterboxes from there.
    let desired = if let (Some(w), Some(h)) =
        (env_u32("RINK_WINDOW_WIDTH"), env_u32("RINK_WINDOW_HEIGHT"))
    {
        PhysicalSize::new(w.max(1), h.max(1))
    } else {
        PhysicalSize::new(1920u32, 1080u32)
    };

    let window = AppConfig {
        title: "RINK".to_string(),
        canvas: SurfaceSize::new(PLAYFIELD_WIDTH as u32, PLAYFIELD_HEIGHT as u32),
        desired_size: desired,
        clamp_to_monitor: true,
        vsync: env_bool("RINK_VSYNC"),
        present_mode: env_present_mode("RINK_PRESENT_MODE"),
    };

    headful::run(config, window)
}

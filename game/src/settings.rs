use serde::{Deserialize, Serialize};

/// Keyboard adjustment granularity for volume sliders.
pub const VOLUME_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeKind {
    Sound,
    Music,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioSettings {
    pub sound_volume: f32,
    pub music_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_volume: 0.5,
            music_volume: 0.5,
        }
    }
}

impl AudioSettings {
    pub fn clamp(mut self) -> Self {
        self.sound_volume = self.sound_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    pub fn volume(&self, which: VolumeKind) -> f32 {
        match which {
            VolumeKind::Sound => self.sound_volume,
            VolumeKind::Music => self.music_volume,
        }
    }

    /// Steps a volume by `delta` and returns the clamped result.
    pub fn adjust(&mut self, which: VolumeKind, delta: f32) -> f32 {
        self.set_volume(which, self.volume(which) + delta)
    }

    /// Sets a volume to the slider fraction directly (already in [0, 1]
    /// when it comes from a track hit, but clamped here regardless).
    pub fn set_volume(&mut self, which: VolumeKind, value: f32) -> f32 {
        let value = value.clamp(0.0, 1.0);
        match which {
            VolumeKind::Sound => self.sound_volume = value,
            VolumeKind::Music => self.music_volume = value,
        }
        value
    }
}

/// How the player steers: keyboard axes, or press-and-hold toward the
/// pointer on touch-like hosts. Injected at construction so nothing has to
/// probe the platform at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    TouchLike,
}

/// What happens when the player pushes the puck against a playfield edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryPolicy {
    /// Position is unconstrained; the puck may leave the visible field.
    #[default]
    FreeRoam,
    /// Position clamps so the puck stays fully inside the borders.
    Contain,
}

/// Construction-time knobs for the demo. Runtime-adjustable state
/// (volumes, selections) lives in `DemoState` instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub device: DeviceProfile,
    pub boundary: BoundaryPolicy,
    /// Play a short blip whenever the sound volume changes, so the new
    /// level can be judged immediately.
    pub audition_on_change: bool,
    /// Seed for the menu-background drift animation.
    pub attract_seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            device: DeviceProfile::Desktop,
            boundary: BoundaryPolicy::FreeRoam,
            audition_on_change: true,
            attract_seed: 0xC1DC_1E5,
        }
    }
}

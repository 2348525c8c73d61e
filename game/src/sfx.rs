//! Audio output for the shell.
//!
//! Everything is synthesized on the fly, so there are no audio assets to
//! ship or fail to load. The sim describes audio as plain data
//! (`music_playing`, `music_epoch`, `blip_seq` on `DemoState`); `Sfx::sync`
//! reconciles the output device with that description once per frame.

use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::state::DemoState;

/// Gain applied on top of the user music volume, so 100% still sits under
/// the blips.
pub const MUSIC_GAIN: f32 = 0.24;

/// Gain applied on top of the user sound volume for one-shot blips.
pub const BLIP_GAIN: f32 = 0.7;

pub fn music_sink_volume(user_volume: f32) -> f32 {
    MUSIC_GAIN * user_volume.clamp(0.0, 1.0)
}

pub fn blip_sink_volume(user_volume: f32) -> f32 {
    BLIP_GAIN * user_volume.clamp(0.0, 1.0)
}

/// Endless procedural arpeggio used as background music. An envelope per
/// note keeps note boundaries click-free.
#[derive(Debug, Clone)]
pub struct BgMusic {
    sample_rate: u32,
    channels: u16,
    frame: u64,
    chan: u16,
}

impl BgMusic {
    pub fn new() -> Self {
        Self {
            sample_rate: 48_000,
            channels: 2,
            frame: 0,
            chan: 0,
        }
    }
}

impl Default for BgMusic {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for BgMusic {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        // F major and G major bars, alternating.
        const NOTES_HZ: [f32; 8] = [174.61, 220.0, 261.63, 220.0, 196.0, 246.94, 293.66, 246.94];

        let note_len_frames: u64 = (self.sample_rate as u64) * 3 / 10;
        let note_i = ((self.frame / note_len_frames) % (NOTES_HZ.len() as u64)) as usize;
        let freq_hz = NOTES_HZ[note_i];

        let pos_in_note = self.frame % note_len_frames;
        let t = pos_in_note as f32 / self.sample_rate as f32;
        let phase = 2.0 * std::f32::consts::PI * freq_hz * t;

        let attack_frames: u64 = (self.sample_rate as u64) / 125;
        let release_frames: u64 = (self.sample_rate as u64) / 33;
        let release_start = note_len_frames.saturating_sub(release_frames);

        let env = if pos_in_note < attack_frames {
            pos_in_note as f32 / attack_frames.max(1) as f32
        } else if pos_in_note >= release_start {
            let remaining = note_len_frames.saturating_sub(pos_in_note);
            remaining as f32 / release_frames.max(1) as f32
        } else {
            1.0
        };

        let base = phase.sin();
        let harmonic = (phase * 2.0).sin() * 0.25;
        let sample = (base + harmonic) * 0.20 * env;

        // Advance in interleaved (stereo) sample space.
        self.chan += 1;
        if self.chan >= self.channels {
            self.chan = 0;
            self.frame = self.frame.wrapping_add(1);
        }

        Some(sample)
    }
}

impl Source for BgMusic {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Short decaying blip for volume audition and the gameplay action key.
#[derive(Debug, Clone)]
pub struct Blip {
    sample_rate: u32,
    frame: u64,
    len_frames: u64,
}

impl Blip {
    pub fn new() -> Self {
        let sample_rate = 48_000;
        Self {
            sample_rate,
            frame: 0,
            len_frames: (sample_rate as u64) / 12,
        }
    }
}

impl Default for Blip {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Blip {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.len_frames {
            return None;
        }
        let t = self.frame as f32 / self.sample_rate as f32;
        let env = 1.0 - self.frame as f32 / self.len_frames as f32;
        let phase = 2.0 * std::f32::consts::PI * 880.0 * t;
        self.frame += 1;
        Some(phase.sin() * 0.5 * env * env)
    }
}

impl Source for Blip {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.len_frames as f64 / self.sample_rate as f64,
        ))
    }
}

pub struct Sfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music_sink: Option<Sink>,
    seen_epoch: u64,
    seen_blips: u64,
}

impl Sfx {
    /// Opens the default output device. Callers treat failure as "run
    /// silent", not as a startup error.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music_sink: None,
            seen_epoch: 0,
            seen_blips: 0,
        })
    }

    /// Brings the device in line with the state's audio fields. Volumes are
    /// pushed every frame so slider changes land immediately.
    pub fn sync(&mut self, state: &DemoState) {
        if state.music_epoch != self.seen_epoch {
            self.seen_epoch = state.music_epoch;
            self.restart_music();
        }

        if let Some(sink) = self.music_sink.as_ref() {
            sink.set_volume(music_sink_volume(state.audio.music_volume));
            if state.music_playing {
                if sink.is_paused() {
                    sink.play();
                }
            } else if !sink.is_paused() {
                sink.pause();
            }
        }

        if state.blip_seq != self.seen_blips {
            // Several cues in one frame collapse into a single blip.
            self.seen_blips = state.blip_seq;
            self.play_blip(blip_sink_volume(state.audio.sound_volume));
        }
    }

    /// Starts the track over from the top. Dropping the previous sink stops
    /// its queue.
    fn restart_music(&mut self) {
        self.music_sink = Sink::try_new(&self.handle).ok().map(|sink| {
            sink.append(BgMusic::new());
            sink
        });
        if self.music_sink.is_none() {
            log::warn!("music sink unavailable; continuing without background music");
        }
    }

    fn play_blip(&self, volume: f32) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(volume);
        sink.append(Blip::new());
        sink.detach();
    }
}

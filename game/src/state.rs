use serde::{Deserialize, Serialize};

use engine::GameLogic;

use crate::input::{Key, TickInput};
use crate::menu::{
    MAIN_MENU_ITEM_COUNT, OPTIONS_ITEM_COUNT, hit_test_rows, track_contains, volume_slider,
};
use crate::puck::{DriftPuck, MoveAxes, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, Puck, Rng};
use crate::settings::{AudioSettings, DemoConfig, DeviceProfile, VolumeKind};
use crate::view::{AppView, ViewEffect, ViewEvent};

/// Scale factor from playfield space to the host window, recomputed every
/// tick so conversions stay current across resizes.
pub fn display_scale(host_width: u32, host_height: u32) -> f32 {
    if host_width == 0 || host_height == 0 {
        return 0.0;
    }
    (host_width as f32 / PLAYFIELD_WIDTH).min(host_height as f32 / PLAYFIELD_HEIGHT)
}

/// Complete application state for one frame.
///
/// Audio is represented as data: `music_playing` is the level flag the
/// shell syncs the stream against, `music_epoch` bumps when the track
/// should restart from the top, and `blip_seq` bumps once per one-shot
/// effect. The shell diffs these counters; the state itself never touches
/// a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoState {
    pub view: AppView,
    pub first_launch: bool,
    pub focus_lost: bool,
    pub audio: AudioSettings,
    pub puck: Puck,
    pub drift: DriftPuck,
    pub rng: Rng,
    /// Pointer position in playfield space as of the previous tick; the
    /// hover-on-motion rule compares fresh input against this.
    pub pointer: Option<(f32, f32)>,
    /// Slider currently being dragged, if any.
    pub drag: Option<VolumeKind>,
    pub music_playing: bool,
    pub music_epoch: u64,
    pub blip_seq: u64,
    pub display_scale: f32,
}

impl DemoState {
    pub fn new(config: &DemoConfig) -> Self {
        let mut rng = Rng::new(config.attract_seed);
        let drift = DriftPuck::new(&mut rng);
        Self {
            view: AppView::initial(true),
            first_launch: true,
            focus_lost: false,
            audio: AudioSettings::default(),
            puck: Puck::player(),
            drift,
            rng,
            pointer: None,
            drag: None,
            music_playing: false,
            music_epoch: 0,
            blip_seq: 0,
            display_scale: 1.0,
        }
    }

    /// One frame of the demo.
    ///
    /// Order within a tick: zero-dt guard, display-scale recompute, focus
    /// resolution, close request, key events in arrival order, pointer
    /// events, then movement (gameplay) or drift (menus).
    pub fn tick(&mut self, config: &DemoConfig, input: &TickInput) {
        if input.dt <= 0.0 {
            return;
        }

        self.display_scale = display_scale(input.host_width, input.host_height);

        let was_lost = self.focus_lost;
        self.focus_lost = !input.focused;
        if self.focus_lost {
            if !was_lost {
                // An in-flight drag cannot complete while unfocused; the
                // release may never be delivered.
                self.music_playing = false;
                self.drag = None;
            }
            return;
        }
        if was_lost && self.view.is_running() {
            self.music_playing = true;
        }

        let was_running = self.view.is_running();
        let pointer_moved = match (input.pointer, self.pointer) {
            (Some(now), Some(before)) => now != before,
            (Some(_), None) => true,
            _ => false,
        };

        if input.close_requested {
            self.apply_event(config, ViewEvent::CloseRequested);
        }
        for key in &input.pressed {
            if let Some(event) = view_event_for(self.view, *key) {
                self.apply_event(config, event);
            }
        }

        self.resolve_pointer(config, input, pointer_moved);

        if self.view.is_running() {
            // The action sound keys off the mode the frame began in, so a
            // space press that just resumed gameplay does not double up.
            if was_running && input.is_pressed(Key::Space) {
                self.blip_seq += 1;
            }
            self.advance_player(config, input);
        } else if matches!(
            self.view,
            AppView::MainMenu { .. } | AppView::Options { .. } | AppView::ExitConfirm { .. }
        ) {
            self.drift.advance(input.dt);
        }

        if input.pointer.is_some() {
            self.pointer = input.pointer;
        }
    }

    /// External hook: nothing inside the demo raises game over, but the
    /// screen and its transitions are live for whatever does.
    pub fn trigger_game_over(&mut self) {
        if self.view.is_running() {
            self.view = AppView::GameOver;
            self.music_playing = false;
        }
    }

    fn advance_player(&mut self, config: &DemoConfig, input: &TickInput) {
        match config.device {
            DeviceProfile::Desktop => {
                let axes = MoveAxes {
                    up: input.up_held,
                    down: input.down_held,
                    left: input.left_held,
                    right: input.right_held,
                };
                self.puck.advance_axes(axes, input.dt, config.boundary);
            }
            DeviceProfile::TouchLike => {
                if input.pointer_held {
                    if let Some(target) = input.pointer.or(self.pointer) {
                        self.puck.advance_toward(target, input.dt, config.boundary);
                    }
                }
            }
        }
    }

    fn apply_event(&mut self, config: &DemoConfig, event: ViewEvent) {
        let (next, effect) = self.view.handle(event, self.first_launch);
        self.view = next;
        self.apply_effect(config, effect);
    }

    fn apply_effect(&mut self, config: &DemoConfig, effect: ViewEffect) {
        match effect {
            ViewEffect::None => {}
            ViewEffect::NewRun => {
                self.puck.reset_center();
                self.drift = DriftPuck::new(&mut self.rng);
                self.first_launch = false;
                self.music_epoch += 1;
                self.music_playing = true;
            }
            ViewEffect::Resume => {
                self.first_launch = false;
                self.music_playing = true;
            }
            ViewEffect::Suspend => {
                self.music_playing = false;
            }
            ViewEffect::AdjustVolume(kind, delta) => {
                self.change_volume(config, kind, self.audio.volume(kind) + delta);
            }
        }
    }

    /// Volume write with the audition rule: a discrete change to the sound
    /// level plays one blip so the new level can be heard.
    fn change_volume(&mut self, config: &DemoConfig, kind: VolumeKind, value: f32) {
        let before = self.audio.volume(kind);
        let after = self.audio.set_volume(kind, value);
        if kind == VolumeKind::Sound
            && config.audition_on_change
            && (after - before).abs() > f32::EPSILON
        {
            self.blip_seq += 1;
        }
    }

    fn resolve_pointer(&mut self, config: &DemoConfig, input: &TickInput, moved: bool) {
        let Some(pointer) = input.pointer else {
            if input.pointer_released {
                self.drag = None;
            }
            return;
        };

        // Hover re-selects only after actual motion, so a resting pointer
        // does not fight keyboard navigation.
        if moved && !input.pointer_held {
            let rows = match self.view {
                AppView::MainMenu { .. } => Some(MAIN_MENU_ITEM_COUNT),
                AppView::Options { .. } => Some(OPTIONS_ITEM_COUNT),
                _ => None,
            };
            if let Some(count) = rows {
                if let Some(row) = hit_test_rows(count, pointer.0, pointer.1) {
                    self.apply_event(config, ViewEvent::Hover(row));
                }
            }
        }

        if input.pointer_pressed {
            match self.view {
                AppView::MainMenu { .. } => {
                    if let Some(row) = hit_test_rows(MAIN_MENU_ITEM_COUNT, pointer.0, pointer.1) {
                        self.apply_event(config, ViewEvent::Hover(row));
                        self.apply_event(config, ViewEvent::Confirm);
                    }
                }
                AppView::Options { .. } => {
                    if track_contains(0, pointer.0, pointer.1) {
                        self.drag = Some(VolumeKind::Sound);
                        self.apply_event(config, ViewEvent::Hover(0));
                        let v = volume_slider(0, self.audio.sound_volume).value_from_x(pointer.0);
                        self.change_volume(config, VolumeKind::Sound, v);
                    } else if track_contains(1, pointer.0, pointer.1) {
                        self.drag = Some(VolumeKind::Music);
                        self.apply_event(config, ViewEvent::Hover(1));
                        let v = volume_slider(1, self.audio.music_volume).value_from_x(pointer.0);
                        self.change_volume(config, VolumeKind::Music, v);
                    } else if let Some(row) =
                        hit_test_rows(OPTIONS_ITEM_COUNT, pointer.0, pointer.1)
                    {
                        self.apply_event(config, ViewEvent::Hover(row));
                        self.apply_event(config, ViewEvent::Confirm);
                    }
                }
                _ => {}
            }
        } else if input.pointer_held {
            // Continuous drag tracks the pointer without re-auditioning
            // every frame.
            if let Some(kind) = self.drag {
                let row = match kind {
                    VolumeKind::Sound => 0,
                    VolumeKind::Music => 1,
                };
                let v = volume_slider(row, self.audio.volume(kind)).value_from_x(pointer.0);
                self.audio.set_volume(kind, v);
            }
        }

        // Button-up ends any drag, no matter where the pointer sits.
        if input.pointer_released {
            self.drag = None;
        }
    }
}

fn view_event_for(view: AppView, key: Key) -> Option<ViewEvent> {
    use ViewEvent as E;
    Some(match (view, key) {
        (_, Key::Escape) => E::Back,

        (AppView::MainMenu { .. }, Key::Up) => E::Up,
        (AppView::MainMenu { .. }, Key::Down) => E::Down,
        (AppView::MainMenu { .. }, Key::Enter | Key::Space) => E::Confirm,

        (AppView::Options { .. }, Key::Up) => E::Up,
        (AppView::Options { .. }, Key::Down) => E::Down,
        (AppView::Options { .. }, Key::Left) => E::Left,
        (AppView::Options { .. }, Key::Right) => E::Right,
        (AppView::Options { .. }, Key::Enter) => E::Confirm,

        (AppView::Playing, Key::P) => E::TogglePause,
        (AppView::Paused, Key::P) => E::TogglePause,
        (AppView::Paused, Key::Enter | Key::Space) => E::Confirm,

        (AppView::ExitConfirm { .. }, Key::Y) => E::Yes,
        (AppView::ExitConfirm { .. }, Key::N) => E::No,

        (AppView::GameOver, Key::Enter | Key::Space) => E::Confirm,

        _ => return None,
    })
}

/// The demo as a pure, replayable simulation.
#[derive(Debug, Clone, Default)]
pub struct DemoLogic {
    config: DemoConfig,
}

impl DemoLogic {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }
}

impl GameLogic for DemoLogic {
    type State = DemoState;
    type Input = TickInput;

    fn initial_state(&self) -> DemoState {
        DemoState::new(&self.config)
    }

    fn step(&self, state: &DemoState, input: TickInput) -> DemoState {
        let mut next = state.clone();
        next.tick(&self.config, &input);
        next
    }
}

//! Windowed shell: the winit/pixels app wrapped around the pure sim.
//!
//! Per frame this translates raw input to a `TickInput`, steps the logic,
//! syncs the audio device against the new state, and draws the scene. The
//! app ends when the sim reaches its terminal mode, never directly on a
//! window close request.

pub mod input_adapter;

use std::error::Error;
use std::time::Duration;

use engine::GameLogic;
use engine::app::{AppConfig, AppContext, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;

use crate::scene;
use crate::settings::DemoConfig;
use crate::sfx::Sfx;
use crate::state::{DemoLogic, DemoState};

pub struct RinkApp {
    logic: DemoLogic,
    sfx: Option<Sfx>,
}

impl RinkApp {
    pub fn new(config: DemoConfig) -> Self {
        let sfx = match Sfx::new() {
            Ok(sfx) => Some(sfx),
            Err(err) => {
                log::warn!("audio device unavailable ({err}); running silent");
                None
            }
        };
        Self {
            logic: DemoLogic::new(config),
            sfx,
        }
    }
}

impl GameApp for RinkApp {
    type State = DemoState;

    fn init_state(&mut self, _ctx: &mut AppContext) -> DemoState {
        self.logic.initial_state()
    }

    fn update_state(
        &mut self,
        state: &mut DemoState,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> bool {
        let tick = input_adapter::tick_input(input, &ctx.viewport, dt.as_secs_f32());
        *state = self.logic.step(state, tick);

        if let Some(sfx) = self.sfx.as_mut() {
            sfx.sync(state);
        }

        !state.view.is_terminal()
    }

    fn render(&mut self, state: &DemoState, gfx: &mut dyn Renderer2d) {
        scene::draw_scene(gfx, state);
    }
}

pub fn run(config: DemoConfig, window: AppConfig) -> Result<(), Box<dyn Error>> {
    run_game(window, RinkApp::new(config))
}

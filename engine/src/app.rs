use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsPresenter;
use crate::surface::SurfaceSize;
use crate::viewport::Viewport;

pub struct AppConfig {
    pub title: String,
    /// Fixed logical canvas the game draws into.
    pub canvas: SurfaceSize,
    /// Preferred initial window size, before monitor clamping.
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
    pub present_mode: Option<pixels::wgpu::PresentMode>,
}

pub struct AppContext {
    pub window: Window,
    pub presenter: PixelsPresenter,
    pub window_size: SurfaceSize,
    pub viewport: Viewport,
}

/// Raw per-frame input collected from the event loop.
///
/// Edge fields (`*_pressed`, `*_released`, `moved`, `close_requested`,
/// `focus_changed`) are true only on the frame the event arrived and are
/// cleared after each update; level fields persist across frames.
#[derive(Debug, Clone)]
pub struct InputFrame {
    /// Last known pointer position in window coordinates.
    pub pointer_pos: Option<(f32, f32)>,
    pub pointer_moved: bool,
    pub pointer_pressed: bool,
    pub pointer_released: bool,
    pub pointer_held: bool,
    pub keys_pressed: Vec<VirtualKeyCode>,
    pub keys_released: Vec<VirtualKeyCode>,
    pub keys_held: Vec<VirtualKeyCode>,
    pub focused: bool,
    pub focus_changed: bool,
    pub close_requested: bool,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            pointer_pos: None,
            pointer_moved: false,
            pointer_pressed: false,
            pointer_released: false,
            pointer_held: false,
            keys_pressed: Vec::new(),
            keys_released: Vec::new(),
            keys_held: Vec::new(),
            focused: true,
            focus_changed: false,
            close_requested: false,
        }
    }
}

impl InputFrame {
    pub fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: VirtualKeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn note_key_down(&mut self, key: VirtualKeyCode) {
        // Key repeat arrives as extra Pressed events; only the first one
        // counts as an edge.
        if !self.keys_held.contains(&key) {
            self.keys_held.push(key);
            self.keys_pressed.push(key);
        }
    }

    pub fn note_key_up(&mut self, key: VirtualKeyCode) {
        self.keys_held.retain(|k| *k != key);
        self.keys_released.push(key);
    }

    pub fn clear_frame_edges(&mut self) {
        self.pointer_moved = false;
        self.pointer_pressed = false;
        self.pointer_released = false;
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.focus_changed = false;
        self.close_requested = false;
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// Advances one frame. Returning `false` ends the app.
    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> bool;

    fn render(&mut self, state: &Self::State, gfx: &mut dyn Renderer2d);

    /// Raw event hook, called before built-in handling. Return `true` to
    /// swallow the event.
    fn handle_event(
        &mut self,
        _event: &Event<()>,
        _state: &mut Self::State,
        _input: &mut InputFrame,
        _ctx: &mut AppContext,
    ) -> bool {
        false
    }
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = if let Some(monitor) = monitor_size {
        PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        )
    } else {
        config.desired_size
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let window_size = SurfaceSize::new(window_size.width, window_size.height);
    let canvas = config.canvas;

    let build_pixels = |present_mode: Option<pixels::wgpu::PresentMode>| -> Result<Pixels, pixels::Error> {
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        let mut pixels_builder = PixelsBuilder::new(canvas.width, canvas.height, surface_texture);
        if let Some(vsync) = config.vsync {
            pixels_builder = pixels_builder.enable_vsync(vsync);
        }
        if let Some(mode) = present_mode {
            pixels_builder = pixels_builder.present_mode(mode);
        }
        pixels_builder.build()
    };

    let pixels = if let Some(mode) = config.present_mode {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| build_pixels(Some(mode)))) {
            Ok(res) => res?,
            Err(_) => {
                log::warn!("requested present mode {mode:?} was not supported; falling back");
                build_pixels(None)?
            }
        }
    } else {
        build_pixels(None)?
    };

    let presenter = PixelsPresenter::new(pixels, canvas)?;

    let mut ctx = AppContext {
        window,
        presenter,
        window_size,
        viewport: Viewport::new(canvas, window_size),
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if game.handle_event(&event, &mut state, &mut input, &mut ctx) {
            return;
        }

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    // The game decides what a close request means (it may
                    // show a confirm screen first).
                    input.close_requested = true;
                }
                WindowEvent::Resized(size) => {
                    ctx.window_size = SurfaceSize::new(size.width, size.height);
                    ctx.viewport.set_host(ctx.window_size);
                    if let Err(err) = ctx.presenter.resize_window(size.width, size.height) {
                        log::warn!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::Focused(focused) => {
                    input.focused = *focused;
                    input.focus_changed = true;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.pointer_pos = Some((position.x as f32, position.y as f32));
                    input.pointer_moved = true;
                }
                WindowEvent::MouseInput { state: button_state, button, .. } => {
                    if *button == MouseButton::Left {
                        match button_state {
                            ElementState::Pressed => {
                                input.pointer_pressed = true;
                                input.pointer_held = true;
                            }
                            ElementState::Released => {
                                input.pointer_released = true;
                                input.pointer_held = false;
                            }
                        }
                    }
                }
                WindowEvent::KeyboardInput { input: key_event, .. } => {
                    if let Some(key) = key_event.virtual_keycode {
                        match key_event.state {
                            ElementState::Pressed => {
                                let was_held = input.key_held(key);
                                input.note_key_down(key);
                                // Alt+Enter toggles borderless fullscreen at
                                // the shell level; the chord is swallowed so
                                // it never doubles as a menu confirm.
                                if !was_held
                                    && key == VirtualKeyCode::Return
                                    && (input.key_held(VirtualKeyCode::LAlt)
                                        || input.key_held(VirtualKeyCode::RAlt))
                                {
                                    input.keys_pressed.retain(|k| *k != VirtualKeyCode::Return);
                                    if ctx.window.fullscreen().is_some() {
                                        ctx.window.set_fullscreen(None);
                                    } else {
                                        ctx.window
                                            .set_fullscreen(Some(Fullscreen::Borderless(None)));
                                    }
                                }
                            }
                            ElementState::Released => input.note_key_up(key),
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let keep_running = game.update_state(&mut state, &input, dt, &mut ctx);
                input.clear_frame_edges();
                if !keep_running {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                ctx.presenter.draw_frame(|gfx| {
                    game.render(&state, gfx);
                });
                if let Err(err) = ctx.presenter.present() {
                    log::warn!("present failed: {err}");
                }
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}

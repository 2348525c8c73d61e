use engine::{GameLogic, HeadlessRunner};

use game::input::{Key, TickInput};
use game::puck::{BORDER_OFFSET_X, PUCK_RADIUS};
use game::settings::{BoundaryPolicy, DemoConfig, DeviceProfile};
use game::state::DemoLogic;
use game::view::AppView;

const DT: f32 = 0.25;

fn playing_runner(config: DemoConfig) -> HeadlessRunner<DemoLogic> {
    let mut runner = HeadlessRunner::new(DemoLogic::new(config));
    runner.step(TickInput::key(1.0 / 60.0, Key::Enter));
    assert_eq!(runner.state().view, AppView::Playing);
    runner
}

fn held(dt: f32, up: bool, down: bool, left: bool, right: bool) -> TickInput {
    let mut input = TickInput::idle(dt);
    input.up_held = up;
    input.down_held = down;
    input.left_held = left;
    input.right_held = right;
    input
}

#[test]
fn up_beats_down_when_both_are_held() {
    let mut runner = playing_runner(DemoConfig::default());

    for _ in 0..4 {
        runner.step(held(DT, true, true, false, false));
    }

    let puck = &runner.state().puck;
    assert_eq!(puck.x, 400.0);
    // One second at full speed, upward only.
    assert_eq!(puck.y, 400.0 - 600.0);
}

#[test]
fn left_beats_right_when_both_are_held() {
    let mut runner = playing_runner(DemoConfig::default());

    runner.step(held(DT, false, false, true, true));
    assert_eq!(runner.state().puck.x, 400.0 - 150.0);
    assert_eq!(runner.state().puck.y, 400.0);
}

#[test]
fn diagonals_apply_both_axes_at_full_speed() {
    let mut runner = playing_runner(DemoConfig::default());

    runner.step(held(DT, true, false, false, true));
    let puck = &runner.state().puck;
    assert_eq!(puck.x, 400.0 + 150.0);
    assert_eq!(puck.y, 400.0 - 150.0);
}

#[test]
fn zero_dt_frame_changes_nothing_at_all() {
    let mut runner = playing_runner(DemoConfig::default());
    runner.step(held(DT, false, false, false, true));
    let before = runner.state().clone();

    let mut frozen = held(0.0, true, true, true, true);
    frozen.pressed = vec![Key::Escape, Key::P];
    frozen.pointer = Some((10.0, 10.0));
    frozen.close_requested = true;
    runner.step(frozen);

    assert_eq!(runner.state(), &before);
}

#[test]
fn free_roam_lets_the_puck_leave_the_arena() {
    let mut runner = playing_runner(DemoConfig::default());

    for _ in 0..8 {
        runner.step(held(DT, false, false, true, false));
    }

    // Two seconds left at full speed: far beyond the arena edge.
    assert_eq!(runner.state().puck.x, 400.0 - 1200.0);
}

#[test]
fn contain_policy_stops_at_the_border() {
    let config = DemoConfig {
        boundary: BoundaryPolicy::Contain,
        ..DemoConfig::default()
    };
    let mut runner = playing_runner(config);

    for _ in 0..8 {
        runner.step(held(DT, false, false, true, false));
    }

    assert_eq!(runner.state().puck.x, BORDER_OFFSET_X + PUCK_RADIUS);
    assert_eq!(runner.state().puck.y, 400.0);
}

#[test]
fn touch_profile_steers_toward_the_held_pointer_without_overshoot() {
    let config = DemoConfig {
        device: DeviceProfile::TouchLike,
        ..DemoConfig::default()
    };
    let mut runner = playing_runner(config);

    let mut toward = TickInput::idle(0.1);
    toward.pointer = Some((500.0, 400.0));
    toward.pointer_held = true;

    runner.step(toward.clone());
    assert_eq!(runner.state().puck.x, 460.0);

    runner.step(toward.clone());
    assert_eq!(runner.state().puck.x, 500.0);

    // Already there: later frames snap in place instead of oscillating.
    runner.step(toward.clone());
    assert_eq!(runner.state().puck.x, 500.0);

    // Releasing the pointer stops the steer.
    let mut hover_only = TickInput::idle(0.1);
    hover_only.pointer = Some((700.0, 400.0));
    runner.step(hover_only);
    assert_eq!(runner.state().puck.x, 500.0);
}

#[test]
fn touch_profile_ignores_the_keyboard_axes() {
    let config = DemoConfig {
        device: DeviceProfile::TouchLike,
        ..DemoConfig::default()
    };
    let mut runner = playing_runner(config);

    runner.step(held(DT, true, false, false, false));
    assert_eq!(runner.state().puck.y, 400.0);
}

#[test]
fn menus_freeze_the_player_but_keep_the_attract_drift_moving() {
    let runner = HeadlessRunner::new(DemoLogic::default());
    let drift_before = runner.state().drift.puck;
    let player_before = runner.state().puck;

    let mut runner = runner;
    for _ in 0..4 {
        runner.step(held(DT, true, false, true, false));
    }

    let state = runner.state();
    assert_eq!(state.puck, player_before);
    assert!(
        state.drift.puck.x != drift_before.x || state.drift.puck.y != drift_before.y,
        "attract puck should keep drifting behind the menu"
    );
}

#[test]
fn focus_loss_freezes_gameplay_and_regain_resumes_music() {
    let mut runner = playing_runner(DemoConfig::default());

    let mut unfocused = held(DT, false, false, false, true);
    unfocused.focused = false;
    runner.step(unfocused);

    let state = runner.state();
    assert!(state.focus_lost);
    assert!(!state.music_playing);
    assert_eq!(state.puck.x, 400.0);

    // Input while unfocused is ignored outright.
    let mut key_while_lost = TickInput::key(DT, Key::Escape);
    key_while_lost.focused = false;
    runner.step(key_while_lost);
    assert_eq!(runner.state().view, AppView::Playing);

    runner.step(TickInput::idle(DT));
    let state = runner.state();
    assert!(!state.focus_lost);
    assert!(state.music_playing);
    assert_eq!(state.view, AppView::Playing);
}

#[test]
fn focus_regain_outside_gameplay_leaves_music_off() {
    let logic = DemoLogic::default();
    let mut state = logic.initial_state();

    let mut unfocused = TickInput::idle(DT);
    unfocused.focused = false;
    state = logic.step(&state, unfocused);
    assert!(state.focus_lost);

    state = logic.step(&state, TickInput::idle(DT));
    assert!(!state.focus_lost);
    assert!(!state.music_playing);
}

use serde::{Deserialize, Serialize};

/// Discrete keys the shell reports as press edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    Y,
    N,
    P,
}

/// One tick's worth of input, already translated to playfield terms.
///
/// Key edges are press events (true once per physical press); the `*_held`
/// axes are level state sampled this tick. The pointer position is in
/// playfield coordinates, converted by the shell before it gets here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Key press edges in arrival order.
    pub pressed: Vec<Key>,
    pub up_held: bool,
    pub down_held: bool,
    pub left_held: bool,
    pub right_held: bool,
    pub pointer: Option<(f32, f32)>,
    pub pointer_pressed: bool,
    pub pointer_released: bool,
    pub pointer_held: bool,
    pub focused: bool,
    pub close_requested: bool,
    /// Host window size, for the per-tick display-scale recompute.
    pub host_width: u32,
    pub host_height: u32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: 0.0,
            pressed: Vec::new(),
            up_held: false,
            down_held: false,
            left_held: false,
            right_held: false,
            pointer: None,
            pointer_pressed: false,
            pointer_released: false,
            pointer_held: false,
            focused: true,
            close_requested: false,
            host_width: crate::puck::PLAYFIELD_WIDTH as u32,
            host_height: crate::puck::PLAYFIELD_HEIGHT as u32,
        }
    }
}

impl TickInput {
    /// A focused tick with no input at all.
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    /// A tick whose only content is a single key press.
    pub fn key(dt: f32, key: Key) -> Self {
        Self {
            dt,
            pressed: vec![key],
            ..Self::default()
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tick_reports_no_edges() {
        let input = TickInput::idle(0.016);
        assert!(input.pressed.is_empty());
        assert!(!input.pointer_pressed);
        assert!(input.focused);
    }

    #[test]
    fn key_tick_reports_exactly_one_edge() {
        let input = TickInput::key(0.016, Key::Enter);
        assert!(input.is_pressed(Key::Enter));
        assert!(!input.is_pressed(Key::Escape));
    }
}

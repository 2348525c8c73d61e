use serde::{Deserialize, Serialize};

use crate::settings::BoundaryPolicy;

/// Logical playfield dimensions. Everything in the game speaks these
/// coordinates; the shell scales them to the window.
pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 800.0;

/// Side margins of the framed arena inside the playfield.
pub const BORDER_OFFSET_X: f32 = 20.0;
pub const BORDER_OFFSET_Y: f32 = 50.0;

pub const PUCK_RADIUS: f32 = 15.0;
pub const PLAYER_SPEED: f32 = 600.0;

const DRIFT_SPEED_MIN: f32 = 500.0;
const DRIFT_SPEED_MAX: f32 = 700.0;

/// Level state of the four movement keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAxes {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The controllable circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
}

impl Puck {
    pub fn centered(radius: f32, speed: f32) -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0,
            y: PLAYFIELD_HEIGHT / 2.0,
            radius,
            speed,
        }
    }

    pub fn player() -> Self {
        Self::centered(PUCK_RADIUS, PLAYER_SPEED)
    }

    pub fn reset_center(&mut self) {
        self.x = PLAYFIELD_WIDTH / 2.0;
        self.y = PLAYFIELD_HEIGHT / 2.0;
    }

    /// Keyboard movement. Within each axis pair the first-listed key wins:
    /// up beats down, left beats right.
    pub fn advance_axes(&mut self, axes: MoveAxes, dt: f32, boundary: BoundaryPolicy) {
        if axes.up {
            self.y -= self.speed * dt;
        } else if axes.down {
            self.y += self.speed * dt;
        }

        if axes.left {
            self.x -= self.speed * dt;
        } else if axes.right {
            self.x += self.speed * dt;
        }

        self.apply_boundary(boundary);
    }

    /// Pointer steering: move at full speed along the unit vector toward
    /// `target`, snapping onto it when a single step would overshoot. The
    /// snap branch also covers the degenerate zero-length direction, so the
    /// normalization below never divides by zero.
    pub fn advance_toward(&mut self, target: (f32, f32), dt: f32, boundary: BoundaryPolicy) {
        let dx = target.0 - self.x;
        let dy = target.1 - self.y;
        let len = (dx * dx + dy * dy).sqrt();
        let step = self.speed * dt;

        if len <= step {
            self.x = target.0;
            self.y = target.1;
        } else {
            self.x += dx / len * step;
            self.y += dy / len * step;
        }

        self.apply_boundary(boundary);
    }

    fn apply_boundary(&mut self, boundary: BoundaryPolicy) {
        match boundary {
            BoundaryPolicy::FreeRoam => {}
            BoundaryPolicy::Contain => {
                self.x = self.x.clamp(
                    BORDER_OFFSET_X + self.radius,
                    PLAYFIELD_WIDTH - BORDER_OFFSET_X - self.radius,
                );
                self.y = self.y.clamp(
                    BORDER_OFFSET_Y + self.radius,
                    PLAYFIELD_HEIGHT - BORDER_OFFSET_Y - self.radius,
                );
            }
        }
    }
}

/// Autonomous puck shown behind the menus: constant velocity, reflecting
/// off the arena borders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftPuck {
    pub puck: Puck,
    pub vx: f32,
    pub vy: f32,
}

impl DriftPuck {
    pub fn new(rng: &mut Rng) -> Self {
        Self {
            puck: Puck::centered(PUCK_RADIUS, 0.0),
            vx: rng.range_f32(DRIFT_SPEED_MIN, DRIFT_SPEED_MAX) * rng.sign(),
            vy: rng.range_f32(DRIFT_SPEED_MIN, DRIFT_SPEED_MAX) * rng.sign(),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.puck.x += self.vx * dt;
        self.puck.y += self.vy * dt;

        let min_x = BORDER_OFFSET_X + self.puck.radius;
        let max_x = PLAYFIELD_WIDTH - BORDER_OFFSET_X - self.puck.radius;
        if self.puck.x <= min_x || self.puck.x >= max_x {
            self.vx = -self.vx;
            self.puck.x = self.puck.x.clamp(min_x, max_x);
        }

        let min_y = BORDER_OFFSET_Y + self.puck.radius;
        let max_y = PLAYFIELD_HEIGHT - BORDER_OFFSET_Y - self.puck.radius;
        if self.puck.y <= min_y || self.puck.y >= max_y {
            self.vy = -self.vy;
            self.puck.y = self.puck.y.clamp(min_y, max_y);
        }
    }
}

/// Small xorshift* generator so drift setup is reproducible from a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let t = self.next_u32() as f32 / u32::MAX as f32;
        lo + (hi - lo) * t
    }

    pub fn sign(&mut self) -> f32 {
        if self.next_u32() & 1 == 0 { 1.0 } else { -1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_starves_down_when_both_held() {
        let mut puck = Puck::player();
        let before_y = puck.y;
        puck.advance_axes(
            MoveAxes {
                up: true,
                down: true,
                ..MoveAxes::default()
            },
            0.1,
            BoundaryPolicy::FreeRoam,
        );
        assert!(puck.y < before_y, "expected upward movement only");
    }

    #[test]
    fn left_starves_right_when_both_held() {
        let mut puck = Puck::player();
        let before_x = puck.x;
        puck.advance_axes(
            MoveAxes {
                left: true,
                right: true,
                ..MoveAxes::default()
            },
            0.1,
            BoundaryPolicy::FreeRoam,
        );
        assert!(puck.x < before_x);
    }

    #[test]
    fn axes_move_independently() {
        let mut puck = Puck::player();
        puck.advance_axes(
            MoveAxes {
                up: true,
                left: true,
                ..MoveAxes::default()
            },
            0.1,
            BoundaryPolicy::FreeRoam,
        );
        assert_eq!(puck.x, PLAYFIELD_WIDTH / 2.0 - PLAYER_SPEED * 0.1);
        assert_eq!(puck.y, PLAYFIELD_HEIGHT / 2.0 - PLAYER_SPEED * 0.1);
    }

    #[test]
    fn free_roam_lets_puck_leave_the_arena() {
        let mut puck = Puck::player();
        for _ in 0..60 {
            puck.advance_axes(
                MoveAxes {
                    left: true,
                    ..MoveAxes::default()
                },
                0.1,
                BoundaryPolicy::FreeRoam,
            );
        }
        assert!(puck.x < 0.0);
    }

    #[test]
    fn contain_clamps_at_the_border_inset_by_radius() {
        let mut puck = Puck::player();
        for _ in 0..60 {
            puck.advance_axes(
                MoveAxes {
                    left: true,
                    ..MoveAxes::default()
                },
                0.1,
                BoundaryPolicy::Contain,
            );
        }
        assert_eq!(puck.x, BORDER_OFFSET_X + puck.radius);
    }

    #[test]
    fn toward_moves_at_configured_speed() {
        let mut puck = Puck::player();
        let start = (puck.x, puck.y);
        puck.advance_toward((puck.x + 300.0, puck.y), 0.1, BoundaryPolicy::FreeRoam);
        let moved = puck.x - start.0;
        assert!((moved - PLAYER_SPEED * 0.1).abs() < 1e-3);
        assert_eq!(puck.y, start.1);
    }

    #[test]
    fn toward_snaps_instead_of_overshooting() {
        let mut puck = Puck::player();
        let target = (puck.x + 5.0, puck.y + 5.0);
        puck.advance_toward(target, 0.1, BoundaryPolicy::FreeRoam);
        assert_eq!((puck.x, puck.y), target);
    }

    #[test]
    fn toward_own_center_is_a_no_op() {
        let mut puck = Puck::player();
        let before = puck;
        puck.advance_toward((puck.x, puck.y), 0.1, BoundaryPolicy::FreeRoam);
        assert_eq!(puck, before);
    }

    #[test]
    fn drift_reflects_off_the_right_border() {
        let mut rng = Rng::new(7);
        let mut drift = DriftPuck::new(&mut rng);
        drift.vx = 600.0;
        drift.vy = 0.0;

        let min_x = BORDER_OFFSET_X + drift.puck.radius;
        let max_x = PLAYFIELD_WIDTH - BORDER_OFFSET_X - drift.puck.radius;
        let mut flipped = false;
        for _ in 0..300 {
            drift.advance(1.0 / 60.0);
            if drift.vx < 0.0 {
                flipped = true;
            }
            assert!(drift.puck.x >= min_x && drift.puck.x <= max_x);
        }
        assert!(flipped, "expected a horizontal bounce within five seconds");
    }

    #[test]
    fn rng_is_deterministic_per_seed() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..8 {
            assert_eq!(a.next_u32(), b.next_u32());
        }

        let mut c = Rng::new(43);
        assert_ne!(a.next_u32(), c.next_u32());
    }

    #[test]
    fn drift_speeds_come_from_the_tuned_band() {
        let mut rng = Rng::new(1);
        for _ in 0..16 {
            let drift = DriftPuck::new(&mut rng);
            assert!((DRIFT_SPEED_MIN..=DRIFT_SPEED_MAX).contains(&drift.vx.abs()));
            assert!((DRIFT_SPEED_MIN..=DRIFT_SPEED_MAX).contains(&drift.vy.abs()));
        }
    }
}

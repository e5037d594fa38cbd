//! Player controller
//!
//! Velocity is derived from the set of held direction keys rather than set
//! and cleared directly by key events, so out-of-order press/release pairs
//! cannot leave a stale velocity behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::clamp_to_rect;
use crate::tuning::Tuning;

/// Logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Right | Direction::Up)
    }

    /// +1 for Right/Up, -1 for Left/Down
    pub fn sign(self) -> f32 {
        if self.is_positive() { 1.0 } else { -1.0 }
    }
}

/// Held keys on one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisKeys {
    /// Presses without a matching release, per side
    negative: u8,
    positive: u8,
    /// Side pressed most recently (wins while both are held)
    last_positive: bool,
}

impl AxisKeys {
    fn press(&mut self, positive: bool) {
        let count = if positive { &mut self.positive } else { &mut self.negative };
        *count = count.saturating_add(1);
        self.last_positive = positive;
    }

    fn release(&mut self, positive: bool) {
        let count = if positive { &mut self.positive } else { &mut self.negative };
        *count = count.saturating_sub(1);
    }

    /// -1, 0 or +1
    pub fn direction(&self) -> f32 {
        match (self.negative > 0, self.positive > 0) {
            (true, true) => {
                if self.last_positive { 1.0 } else { -1.0 }
            }
            (false, true) => 1.0,
            (true, false) => -1.0,
            (false, false) => 0.0,
        }
    }
}

/// Direction keys currently held, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub x: AxisKeys,
    pub y: AxisKeys,
}

impl HeldKeys {
    fn axis_mut(&mut self, axis: Axis) -> &mut AxisKeys {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub fn press(&mut self, dir: Direction) {
        self.axis_mut(dir.axis()).press(dir.is_positive());
    }

    pub fn release(&mut self, dir: Direction) {
        self.axis_mut(dir.axis()).release(dir.is_positive());
    }

    pub fn clear_axis(&mut self, axis: Axis) {
        *self.axis_mut(axis) = AxisKeys::default();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Unit-per-axis direction from the held keys
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.x.direction(), self.y.direction())
    }
}

/// Movement limits for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerLimits {
    /// Half-extents of the clamp rectangle
    pub bounds: Vec2,
    pub max_speed: f32,
    /// World units per (velocity * millisecond)
    pub speed_scale: f32,
}

impl From<&Tuning> for PlayerLimits {
    fn from(t: &Tuning) -> Self {
        Self {
            bounds: t.player_bounds,
            max_speed: t.player_max_speed,
            speed_scale: t.player_speed_scale,
        }
    }
}

fn refresh_velocity(player: &mut Player, limits: &PlayerLimits) {
    player.vel = player.keys.direction() * limits.max_speed;
}

/// Whether the player is still inside (or on) the bound it would move toward
fn within_bound(player: &Player, dir: Direction, limits: &PlayerLimits) -> bool {
    match dir.axis() {
        Axis::X => player.pos.x * dir.sign() <= limits.bounds.x,
        Axis::Y => player.pos.y * dir.sign() <= limits.bounds.y,
    }
}

/// Key-down edge for a direction
///
/// Ignored once the player has already passed the bound in that direction.
pub fn on_pressed(player: &mut Player, dir: Direction, limits: &PlayerLimits) {
    if !within_bound(player, dir, limits) {
        return;
    }
    player.keys.press(dir);
    refresh_velocity(player, limits);
}

/// Key-up edge for a direction
pub fn on_released(player: &mut Player, dir: Direction, limits: &PlayerLimits) {
    player.keys.release(dir);
    refresh_velocity(player, limits);
}

/// Advance position by `vel * elapsed_ms * speed_scale`
pub fn integrate(player: &mut Player, elapsed_ms: f32, limits: &PlayerLimits) {
    let delta = player.vel * elapsed_ms * limits.speed_scale;
    player.pos.x += delta.x;
    player.pos.y += delta.y;
}

/// Clamp to the bounding rectangle and stop motion on any axis resting on a bound
///
/// Stopping also drops the held keys for that axis; a fresh press is needed
/// to move again.
pub fn clamp(player: &mut Player, limits: &PlayerLimits) {
    let b = limits.bounds;
    let p = clamp_to_rect(player.pos.truncate(), b);
    player.pos = p.extend(0.0);

    if p.x.abs() == b.x {
        player.keys.clear_axis(Axis::X);
        player.vel.x = 0.0;
    }
    if p.y.abs() == b.y {
        player.keys.clear_axis(Axis::Y);
        player.vel.y = 0.0;
    }
}

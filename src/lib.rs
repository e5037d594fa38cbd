//! Snowball's Chance - a tunnel-dodging endless runner
//!
//! Core modules:
//! - `sim`: Simulation core (player motion, obstacle field, collisions, game phases)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, motion)
//! - `audio`: Turns simulation events into sound cues
//! - `ui`: Overlay text for each game phase
//! - `platform`: Browser key names to logical inputs
//!
//! Rendering, asset loading and the DOM overlay are external collaborators;
//! they drive [`sim::FrameDriver`] and read its [`sim::FrameReport`].

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Snowball (player sphere)
    pub const PLAYER_RADIUS: f32 = 5.0;
    pub const PLAYER_BOUND_X: f32 = 100.0;
    pub const PLAYER_BOUND_Y: f32 = 50.0;
    /// Velocity set by a held direction key
    pub const PLAYER_MAX_SPEED: f32 = 1.2;
    /// Converts velocity * milliseconds into world units
    pub const PLAYER_SPEED_SCALE: f32 = 0.06;

    /// Fireballs (collidable obstacles)
    pub const OBSTACLE_COUNT: usize = 400;
    pub const OBSTACLE_RADIUS: f32 = 20.0;
    pub const OBSTACLE_BOUND_X: f32 = 100.0;
    pub const OBSTACLE_BOUND_Y: f32 = 50.0;
    /// Distance between consecutive obstacles along the travel axis
    pub const OBSTACLE_SPACING: f32 = 12.0;
    /// Distance from the player's start to the nearest obstacle
    pub const LEADING_DISTANCE: f32 = 100.0;
    /// Cosmetic spin, radians per millisecond
    pub const OBSTACLE_MAX_ROTATION_RATE: f32 = 0.004;

    /// Decorative ring gates spanning the field
    pub const RING_COUNT: usize = 10;
    pub const RING_RADIUS: f32 = 120.0;
    /// Upper bound for configured hazard and ring counts
    pub const MAX_FIELD_ENTITIES: usize = 100_000;

    /// Field speed toward the player, world units per millisecond
    pub const FIELD_SPEED: f32 = 0.2;

    /// Delay between "assets loaded" and the ready prompt, milliseconds
    pub const LOAD_GRACE_MS: f64 = 1000.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5_EB0_BA11;
}

/// Clamp a point component-wise to `[-bounds.x, bounds.x] × [-bounds.y, bounds.y]`
#[inline]
pub fn clamp_to_rect(p: Vec2, bounds: Vec2) -> Vec2 {
    p.clamp(-bounds, bounds)
}

/// Uniform sample from `[-bound, bound]`, or 0 for a degenerate bound
#[inline]
pub fn symmetric_sample<R: rand::Rng>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.random_range(-bound..=bound)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clamp_to_rect() {
        let bounds = Vec2::new(100.0, 50.0);
        assert_eq!(clamp_to_rect(Vec2::new(150.0, -80.0), bounds), Vec2::new(100.0, -50.0));
        assert_eq!(clamp_to_rect(Vec2::new(3.0, 4.0), bounds), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_symmetric_sample_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = symmetric_sample(&mut rng, 25.0);
            assert!((-25.0..=25.0).contains(&v));
        }
        assert_eq!(symmetric_sample(&mut rng, 0.0), 0.0);
        assert_eq!(symmetric_sample(&mut rng, -3.0), 0.0);
    }
}

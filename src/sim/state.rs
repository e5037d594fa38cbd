//! Game state and core simulation types
//!
//! Everything the frame driver advances lives in [`GameState`], a single
//! context value passed to each component.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field;
use super::player::HeldKeys;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the asset loader (and the grace delay after it)
    Loading,
    /// Ready; waiting for a start input
    Idle,
    /// Field is moving toward the player
    Running,
    /// Reached the end of the field
    Won,
    /// Hit an obstacle
    Lost,
}

/// Notifications for audio/presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Loading finished and the grace delay elapsed
    Ready,
    /// A run began
    Started,
    /// The player hit the obstacle with this id
    Collision { obstacle_id: u32 },
    /// The player reached the end of the field
    Won,
    /// Field and player were reset after a finished run
    Reset,
}

/// The snowball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position relative to the field's moving frame (z stays 0)
    pub pos: Vec3,
    pub vel: Vec2,
    pub radius: f32,
    /// Direction keys currently held
    #[serde(skip)]
    pub keys: HeldKeys,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec2::ZERO,
            radius,
            keys: HeldKeys::default(),
        }
    }

    /// Back to the origin with no keys held
    pub fn reset(&mut self) {
        self.pos = Vec3::ZERO;
        self.vel = Vec2::ZERO;
        self.keys.clear();
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Fireball - ends the run on contact
    Hazard,
    /// Decorative ring gate; moves with the field but is never collision-tested
    RingGate,
}

/// An entity placed in the obstacle field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Offset within the field
    pub local_pos: Vec3,
    pub radius: f32,
    /// Cosmetic spin (radians per millisecond), no gameplay effect
    pub rotation_rate: f32,
}

impl Obstacle {
    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.kind == ObstacleKind::Hazard
    }

    /// Position once the field translation is applied
    #[inline]
    pub fn world_pos(&self, translation: f32) -> Vec3 {
        self.local_pos + Vec3::Z * translation
    }
}

/// All obstacles plus how far the field has moved toward the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    /// In generation order
    pub obstacles: Vec<Obstacle>,
    /// Only grows while Running; zeroed on reset
    pub translation: f32,
    /// Translation at which the run is won
    pub total_length: f32,
}

impl ObstacleField {
    pub fn collidable(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_collidable())
    }

    /// Fraction of the field already travelled, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.total_length > 0.0 {
            (self.translation / self.total_length).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.translation >= self.total_length
    }
}

/// The obstacle that ended the last run (cosmetic highlight only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub obstacle_id: Option<u32>,
}

/// Inputs buffered between ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingInputs {
    /// Start/Restart action pressed since the last tick
    pub action: bool,
    /// Asset loader reported completion; latched, the loader signals once
    pub assets_loaded: bool,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub field: ObstacleField,
    pub last_collision: CollisionRecord,
    pub pending: PendingInputs,
    /// Timestamp at which Loading may surface the ready prompt
    pub ready_deadline: Option<f64>,
    /// Asset loader progress in [0, 1] (display only)
    pub load_progress: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state in `Loading`, with the field already generated
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(tuning.seed);
        let field = field::generate(&field::FieldParams::from(&tuning), &mut rng);
        Self {
            player: Player::new(tuning.player_radius),
            tuning,
            phase: GamePhase::Loading,
            field,
            last_collision: CollisionRecord::default(),
            pending: PendingInputs::default(),
            ready_deadline: None,
            load_progress: 0.0,
            rng,
        }
    }

    /// Player position in world space (the player does not move with the field)
    #[inline]
    pub fn player_world_pos(&self) -> Vec3 {
        self.player.pos
    }
}

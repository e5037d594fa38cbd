//! Simulation module
//!
//! All gameplay logic lives here. No rendering, DOM or audio dependencies:
//! - Time comes in as frame timestamps
//! - Seeded RNG only
//! - Stable iteration order (generation order)

pub mod collision;
pub mod field;
pub mod machine;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, first_collision, spheres_overlap};
pub use field::FieldParams;
pub use machine::{Trigger, transition};
pub use player::{Direction, HeldKeys, PlayerLimits};
pub use state::{
    CollisionRecord, GameEvent, GamePhase, GameState, Obstacle, ObstacleField, ObstacleKind,
    Player,
};
pub use tick::{FrameDriver, FrameReport, InputEvent, ObstacleView};

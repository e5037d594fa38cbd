//! Frame driver
//!
//! Called once per displayed frame with the frame timestamp (milliseconds).
//! Input callbacks only touch held keys and pending flags; everything else
//! happens inside [`FrameDriver::tick`], so each tick sees a consistent field.

use glam::Vec3;
use serde::Serialize;

use super::collision::first_collision;
use super::machine::{Trigger, fire};
use super::player::{self, Direction, PlayerLimits};
use super::state::{GameEvent, GamePhase, GameState, ObstacleKind};
use crate::tuning::Tuning;

/// Logical input delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Direction),
    Released(Direction),
    /// Start / Restart
    Action,
}

/// Obstacle as the renderer should draw it this frame
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    /// World position
    pub pos: Vec3,
    pub radius: f32,
    /// Cosmetic spin rate for the renderer to apply
    pub rotation_rate: f32,
    /// Obstacle that ended the last run
    pub highlighted: bool,
}

/// Everything rendering/presentation needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub phase: GamePhase,
    pub player_pos: Vec3,
    pub player_radius: f32,
    pub obstacles: Vec<ObstacleView>,
    pub field_translation: f32,
    /// Fraction of the field travelled, in [0, 1]
    pub progress: f32,
    /// Asset loader progress, in [0, 1]
    pub load_progress: f32,
    /// Notifications raised during this tick
    pub events: Vec<GameEvent>,
}

/// Owns the simulation context and the frame clock
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: GameState,
    previous_timestamp: Option<f64>,
    halted: bool,
}

impl FrameDriver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            previous_timestamp: None,
            halted: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage a scenario
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Input callback; safe to call any number of times between ticks
    pub fn handle_input(&mut self, input: InputEvent) {
        if self.halted {
            return;
        }
        let limits = PlayerLimits::from(&self.state.tuning);
        match input {
            InputEvent::Pressed(dir) => player::on_pressed(&mut self.state.player, dir, &limits),
            InputEvent::Released(dir) => player::on_released(&mut self.state.player, dir, &limits),
            InputEvent::Action => self.state.pending.action = true,
        }
    }

    /// Asset loader completion signal
    ///
    /// Recorded even while halted; the grace timer starts on the first
    /// running tick.
    pub fn notify_assets_loaded(&mut self) {
        self.state.pending.assets_loaded = true;
    }

    /// Asset loader progress (display only)
    pub fn notify_load_progress(&mut self, fraction: f32) {
        if fraction.is_finite() {
            self.state.load_progress = fraction.clamp(0.0, 1.0);
        }
    }

    /// Stop driving the game: cancels the ready timer, drops a pending
    /// action and held keys, and makes further ticks inert until
    /// [`Self::resume`]. A completed asset load is kept, so the timer
    /// re-arms after resuming.
    pub fn halt(&mut self) {
        if self.halted {
            return;
        }
        self.halted = true;
        self.state.ready_deadline = None;
        self.state.pending.action = false;
        self.state.player.keys.clear();
        self.state.player.vel = glam::Vec2::ZERO;
        self.previous_timestamp = None;
        log::info!("Frame driver halted in {:?}", self.state.phase);
    }

    pub fn resume(&mut self) {
        if self.halted {
            self.halted = false;
            log::info!("Frame driver resumed in {:?}", self.state.phase);
        }
    }

    /// Advance the simulation to `now` (milliseconds)
    ///
    /// The first tick after construction, resume, or a run start moves nothing.
    pub fn tick(&mut self, now: f64) -> FrameReport {
        let mut events = Vec::new();
        if self.halted {
            return self.report(events);
        }

        let mut elapsed = match self.previous_timestamp {
            Some(prev) => (now - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.previous_timestamp = Some(now);

        let state = &mut self.state;
        // A press made while still loading is dropped, even on the tick that finishes loading
        let action = std::mem::take(&mut state.pending.action);
        let was_loading = state.phase == GamePhase::Loading;

        // Loading grace delay
        if was_loading {
            if state.pending.assets_loaded && state.ready_deadline.is_none() {
                state.ready_deadline = Some(now + state.tuning.load_grace_ms);
                log::info!("Assets loaded, ready in {} ms", state.tuning.load_grace_ms);
            }
            if let Some(deadline) = state.ready_deadline
                && now >= deadline
            {
                fire(state, Trigger::LoadComplete, &mut events);
            }
        }

        // Start / Restart
        if action && !was_loading && fire(state, Trigger::Action, &mut events) == Some(GamePhase::Running) {
            elapsed = 0.0;
        }

        let limits = PlayerLimits::from(&state.tuning);
        match state.phase {
            GamePhase::Running => {
                state.field.translation += state.tuning.field_speed * elapsed;
                let hit = first_collision(state.player_world_pos(), state.player.radius, &state.field);
                if state.field.is_cleared() {
                    fire(state, Trigger::ReachedEnd, &mut events);
                } else if let Some(hit) = hit {
                    fire(state, Trigger::Collided { obstacle_id: hit.obstacle_id }, &mut events);
                } else {
                    player::integrate(&mut state.player, elapsed, &limits);
                }
            }
            // Free repositioning before a run
            GamePhase::Idle => player::integrate(&mut state.player, elapsed, &limits),
            GamePhase::Loading | GamePhase::Won | GamePhase::Lost => {}
        }
        player::clamp(&mut state.player, &limits);

        self.report(events)
    }

    fn report(&self, events: Vec<GameEvent>) -> FrameReport {
        let state = &self.state;
        let translation = state.field.translation;
        let obstacles = state
            .field
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                kind: o.kind,
                pos: o.world_pos(translation),
                radius: o.radius,
                rotation_rate: o.rotation_rate,
                highlighted: state.last_collision.obstacle_id == Some(o.id),
            })
            .collect();

        FrameReport {
            phase: state.phase,
            player_pos: state.player_world_pos(),
            player_radius: state.player.radius,
            obstacles,
            field_translation: translation,
            progress: state.field.progress(),
            load_progress: state.load_progress,
            events,
        }
    }
}

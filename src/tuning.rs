//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// RNG seed for obstacle placement
    pub seed: u64,

    // === Player ===
    pub player_radius: f32,
    /// Half-extents of the rectangle the player is clamped to
    pub player_bounds: Vec2,
    pub player_max_speed: f32,
    pub player_speed_scale: f32,

    // === Obstacle field ===
    pub obstacle_count: usize,
    pub obstacle_radius: f32,
    /// Half-extents of the lateral range obstacles are drawn from
    pub obstacle_bounds: Vec2,
    pub obstacle_spacing: f32,
    pub leading_distance: f32,
    pub obstacle_max_rotation_rate: f32,
    pub ring_count: usize,
    pub ring_radius: f32,
    pub field_speed: f32,

    // === Loading ===
    pub load_grace_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,

            player_radius: PLAYER_RADIUS,
            player_bounds: Vec2::new(PLAYER_BOUND_X, PLAYER_BOUND_Y),
            player_max_speed: PLAYER_MAX_SPEED,
            player_speed_scale: PLAYER_SPEED_SCALE,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_bounds: Vec2::new(OBSTACLE_BOUND_X, OBSTACLE_BOUND_Y),
            obstacle_spacing: OBSTACLE_SPACING,
            leading_distance: LEADING_DISTANCE,
            obstacle_max_rotation_rate: OBSTACLE_MAX_ROTATION_RATE,
            ring_count: RING_COUNT,
            ring_radius: RING_RADIUS,
            field_speed: FIELD_SPEED,

            load_grace_ms: LOAD_GRACE_MS,
        }
    }
}

/// Cap an entity count at [`MAX_FIELD_ENTITIES`]
fn bound_count(name: &str, value: &mut usize) {
    if *value > MAX_FIELD_ENTITIES {
        log::warn!("Tuning: {} too large ({}), using {}", name, value, MAX_FIELD_ENTITIES);
        *value = MAX_FIELD_ENTITIES;
    }
}

/// Replace a non-finite or negative value with its default
fn repair(name: &str, value: &mut f32, default: f32) {
    if !value.is_finite() || *value < 0.0 {
        log::warn!("Tuning: invalid {} ({}), using {}", name, value, default);
        *value = default;
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Tuning: cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Tuning: cannot parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        repair("player_radius", &mut self.player_radius, d.player_radius);
        repair("player_bounds.x", &mut self.player_bounds.x, d.player_bounds.x);
        repair("player_bounds.y", &mut self.player_bounds.y, d.player_bounds.y);
        repair("player_max_speed", &mut self.player_max_speed, d.player_max_speed);
        repair("player_speed_scale", &mut self.player_speed_scale, d.player_speed_scale);
        repair("obstacle_radius", &mut self.obstacle_radius, d.obstacle_radius);
        repair("obstacle_bounds.x", &mut self.obstacle_bounds.x, d.obstacle_bounds.x);
        repair("obstacle_bounds.y", &mut self.obstacle_bounds.y, d.obstacle_bounds.y);
        repair("obstacle_spacing", &mut self.obstacle_spacing, d.obstacle_spacing);
        repair("leading_distance", &mut self.leading_distance, d.leading_distance);
        repair(
            "obstacle_max_rotation_rate",
            &mut self.obstacle_max_rotation_rate,
            d.obstacle_max_rotation_rate,
        );
        repair("ring_radius", &mut self.ring_radius, d.ring_radius);
        bound_count("obstacle_count", &mut self.obstacle_count);
        bound_count("ring_count", &mut self.ring_count);
        repair("field_speed", &mut self.field_speed, d.field_speed);
        if !self.load_grace_ms.is_finite() || self.load_grace_ms < 0.0 {
            log::warn!("Tuning: invalid load_grace_ms ({}), using {}", self.load_grace_ms, d.load_grace_ms);
            self.load_grace_ms = d.load_grace_ms;
        }
        self
    }
}

//! Obstacle field generation
//!
//! Hazards are laid out one per slot along the travel axis (-z), receding
//! from the player, with random lateral offsets. Ring gates are spread evenly
//! across the same stretch and stay centred.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{Obstacle, ObstacleField, ObstacleKind};
use crate::symmetric_sample;
use crate::tuning::Tuning;

/// Inputs to [`generate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    /// Lateral half-extents for hazard offsets
    pub bounds: Vec2,
    pub spacing: f32,
    pub leading_distance: f32,
    pub radius: f32,
    pub ring_count: usize,
    pub ring_radius: f32,
    pub max_rotation_rate: f32,
}

impl From<&Tuning> for FieldParams {
    fn from(t: &Tuning) -> Self {
        Self {
            count: t.obstacle_count,
            bounds: t.obstacle_bounds,
            spacing: t.obstacle_spacing,
            leading_distance: t.leading_distance,
            radius: t.obstacle_radius,
            ring_count: t.ring_count,
            ring_radius: t.ring_radius,
            max_rotation_rate: t.obstacle_max_rotation_rate,
        }
    }
}

impl FieldParams {
    /// Length of the hazard stretch
    #[inline]
    pub fn span(&self) -> f32 {
        self.count as f32 * self.spacing
    }

    /// Distance the field must travel for the run to be won
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.leading_distance + self.span()
    }

    /// Distance between consecutive ring gates
    pub fn ring_spacing(&self) -> f32 {
        if self.ring_count > 1 {
            self.span() / (self.ring_count - 1) as f32
        } else {
            0.0
        }
    }
}

fn lateral_offset<R: Rng>(rng: &mut R, bounds: Vec2) -> Vec2 {
    let x = symmetric_sample(rng, bounds.x);
    let y = symmetric_sample(rng, bounds.y);
    Vec2::new(x, y)
}

/// Build a fresh field with zero translation
pub fn generate<R: Rng>(params: &FieldParams, rng: &mut R) -> ObstacleField {
    let mut obstacles = Vec::with_capacity(params.count + params.ring_count);

    for i in 0..params.count {
        let lateral = lateral_offset(rng, params.bounds);
        let z = -params.spacing * i as f32 - params.leading_distance;
        obstacles.push(Obstacle {
            id: i as u32,
            kind: ObstacleKind::Hazard,
            local_pos: lateral.extend(z),
            radius: params.radius,
            rotation_rate: symmetric_sample(rng, params.max_rotation_rate),
        });
    }

    let ring_spacing = params.ring_spacing();
    for j in 0..params.ring_count {
        let z = -ring_spacing * j as f32 - params.leading_distance;
        obstacles.push(Obstacle {
            id: (params.count + j) as u32,
            kind: ObstacleKind::RingGate,
            local_pos: Vec3::new(0.0, 0.0, z),
            radius: params.ring_radius,
            rotation_rate: symmetric_sample(rng, params.max_rotation_rate),
        });
    }

    log::info!(
        "Generated field: {} hazards, {} ring gates, span {}",
        params.count,
        params.ring_count,
        params.span()
    );

    ObstacleField {
        obstacles,
        translation: 0.0,
        total_length: params.total_length(),
    }
}

/// Re-draw hazard lateral offsets and rewind the field
///
/// Longitudinal offsets and ring gates are left untouched.
pub fn reset<R: Rng>(field: &mut ObstacleField, bounds: Vec2, rng: &mut R) {
    for obstacle in field.obstacles.iter_mut().filter(|o| o.is_collidable()) {
        let lateral = lateral_offset(rng, bounds);
        obstacle.local_pos.x = lateral.x;
        obstacle.local_pos.y = lateral.y;
    }
    field.translation = 0.0;
    log::info!("Field reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params(count: usize, ring_count: usize) -> FieldParams {
        FieldParams {
            count,
            bounds: Vec2::new(100.0, 50.0),
            spacing: 12.0,
            leading_distance: 100.0,
            radius: 20.0,
            ring_count,
            ring_radius: 120.0,
            max_rotation_rate: 0.004,
        }
    }

    #[test]
    fn test_longitudinal_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = generate(&params(5, 0), &mut rng);
        let zs: Vec<f32> = field.obstacles.iter().map(|o| o.local_pos.z).collect();
        assert_eq!(zs, vec![-100.0, -112.0, -124.0, -136.0, -148.0]);
        assert_eq!(field.translation, 0.0);
        assert!((field.total_length - 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_ring_gates_span_field() {
        let mut rng = Pcg32::seed_from_u64(2);
        let p = params(10, 5);
        let field = generate(&p, &mut rng);
        let rings: Vec<&Obstacle> = field
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::RingGate)
            .collect();
        assert_eq!(rings.len(), 5);
        assert_eq!(field.collidable().count(), 10);
        // (10 * 12) / (5 - 1) = 30
        for (j, ring) in rings.iter().enumerate() {
            let expected = -30.0 * j as f32 - 100.0;
            assert!((ring.local_pos.z - expected).abs() < 1e-4);
            assert!(!ring.is_collidable());
            assert_eq!(ring.local_pos.truncate(), Vec2::ZERO);
        }
    }

    #[test]
    fn test_single_ring_sits_at_leading_distance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = generate(&params(4, 1), &mut rng);
        let ring = field.obstacles.last().unwrap();
        assert_eq!(ring.kind, ObstacleKind::RingGate);
        assert_eq!(ring.local_pos.z, -100.0);
    }

    #[test]
    fn test_ids_follow_generation_order() {
        let mut rng = Pcg32::seed_from_u64(4);
        let field = generate(&params(6, 3), &mut rng);
        for (i, o) in field.obstacles.iter().enumerate() {
            assert_eq!(o.id, i as u32);
        }
    }

    #[test]
    fn test_reset_redraws_lateral_only() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p = params(50, 4);
        let mut field = generate(&p, &mut rng);
        field.translation = 321.0;
        let before = field.obstacles.clone();

        reset(&mut field, p.bounds, &mut rng);

        assert_eq!(field.translation, 0.0);
        for (old, new) in before.iter().zip(&field.obstacles) {
            assert_eq!(old.local_pos.z, new.local_pos.z);
            if new.is_collidable() {
                assert_ne!(old.local_pos.truncate(), new.local_pos.truncate());
            } else {
                assert_eq!(old.local_pos, new.local_pos);
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let p = params(20, 2);
        let a = generate(&p, &mut Pcg32::seed_from_u64(9));
        let b = generate(&p, &mut Pcg32::seed_from_u64(9));
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.local_pos, y.local_pos);
        }
    }

    proptest! {
        #[test]
        fn prop_hazards_within_lateral_bounds(
            seed in any::<u64>(),
            bx in 0.0f32..500.0,
            by in 0.0f32..500.0,
        ) {
            let mut p = params(32, 2);
            p.bounds = Vec2::new(bx, by);
            let field = generate(&p, &mut Pcg32::seed_from_u64(seed));
            for o in field.collidable() {
                prop_assert!(o.local_pos.x.abs() <= bx);
                prop_assert!(o.local_pos.y.abs() <= by);
            }
        }
    }
}

//! Collision detection
//!
//! Player and obstacles are spheres; a hit is any overlap of the two, i.e.
//! centre distance below the combined radius.

use glam::Vec3;

use super::state::{Obstacle, ObstacleField};

/// Result of a collision check against the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Obstacle that was hit
    pub obstacle_id: u32,
    /// Obstacle centre in world space at the time of the hit
    pub point: Vec3,
    /// Combined radius minus centre distance
    pub penetration: f32,
}

/// Check overlap between two spheres
#[inline]
pub fn spheres_overlap(a: Vec3, a_radius: f32, b: Vec3, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

fn check_obstacle(
    player_pos: Vec3,
    player_radius: f32,
    obstacle: &Obstacle,
    translation: f32,
) -> Option<CollisionResult> {
    let world = obstacle.world_pos(translation);
    if !spheres_overlap(player_pos, player_radius, world, obstacle.radius) {
        return None;
    }
    Some(CollisionResult {
        obstacle_id: obstacle.id,
        point: world,
        penetration: player_radius + obstacle.radius - player_pos.distance(world),
    })
}

/// First collidable obstacle (in generation order) overlapping the player
///
/// Stops at the first hit; a single hit is enough to end the run.
pub fn first_collision(
    player_pos: Vec3,
    player_radius: f32,
    field: &ObstacleField,
) -> Option<CollisionResult> {
    field
        .collidable()
        .find_map(|o| check_obstacle(player_pos, player_radius, o, field.translation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn obstacle(id: u32, kind: ObstacleKind, z: f32) -> Obstacle {
        Obstacle {
            id,
            kind,
            local_pos: Vec3::new(0.0, 0.0, z),
            radius: 20.0,
            rotation_rate: 0.0,
        }
    }

    #[test]
    fn test_overlap_inside_combined_radius() {
        // distance 5 < 5 + 20
        assert!(spheres_overlap(
            Vec3::new(0.0, 0.0, -45.0),
            5.0,
            Vec3::new(0.0, 0.0, -50.0),
            20.0
        ));
    }

    #[test]
    fn test_no_overlap_outside_combined_radius() {
        // distance 30 >= 25
        assert!(!spheres_overlap(
            Vec3::new(0.0, 0.0, -20.0),
            5.0,
            Vec3::new(0.0, 0.0, -50.0),
            20.0
        ));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        assert!(!spheres_overlap(Vec3::ZERO, 5.0, Vec3::new(25.0, 0.0, 0.0), 20.0));
    }

    #[test]
    fn test_first_collision_uses_field_translation() {
        let field = ObstacleField {
            obstacles: vec![obstacle(0, ObstacleKind::Hazard, -150.0)],
            translation: 100.0,
            total_length: 1000.0,
        };
        // World z = -50
        let hit = first_collision(Vec3::new(0.0, 0.0, -45.0), 5.0, &field).unwrap();
        assert_eq!(hit.obstacle_id, 0);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, -50.0));
        assert!((hit.penetration - 20.0).abs() < 1e-4);

        assert!(first_collision(Vec3::new(0.0, 0.0, -20.0), 5.0, &field).is_none());
    }

    #[test]
    fn test_ring_gates_never_collide() {
        let field = ObstacleField {
            obstacles: vec![obstacle(0, ObstacleKind::RingGate, 0.0)],
            translation: 0.0,
            total_length: 10.0,
        };
        assert!(first_collision(Vec3::ZERO, 5.0, &field).is_none());
    }

    #[test]
    fn test_first_hit_in_generation_order_wins() {
        let mut far = obstacle(3, ObstacleKind::Hazard, 0.0);
        far.local_pos.x = 20.0;
        let near = obstacle(7, ObstacleKind::Hazard, 0.0);
        let field = ObstacleField {
            obstacles: vec![obstacle(1, ObstacleKind::RingGate, 0.0), far, near],
            translation: 0.0,
            total_length: 10.0,
        };
        // Obstacle 7 is closer, but 3 comes first
        let hit = first_collision(Vec3::ZERO, 5.0, &field).unwrap();
        assert_eq!(hit.obstacle_id, 3);
    }
}

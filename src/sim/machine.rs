//! Game phase transitions
//!
//! `transition` is the whole state chart; `fire` applies a transition to the
//! simulation context together with its side effects.

use super::field;
use super::state::{GameEvent, GamePhase, GameState};

/// Something that may move the game to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Assets loaded and the grace delay elapsed
    LoadComplete,
    /// Start/Restart input
    Action,
    /// Field translation reached the field length
    ReachedEnd,
    /// Collision detector reported a hit
    Collided { obstacle_id: u32 },
}

/// Next phase for a trigger, or `None` when the trigger does nothing here
pub fn transition(phase: GamePhase, trigger: Trigger) -> Option<GamePhase> {
    use GamePhase::*;
    use Trigger::*;

    match (phase, trigger) {
        (Loading, LoadComplete) => Some(Idle),
        (Idle, Action) => Some(Running),
        (Running, ReachedEnd) => Some(Won),
        (Running, Collided { .. }) => Some(Lost),
        // Restart lands in Idle; another Action starts the next run
        (Won | Lost, Action) => Some(Idle),

        (Loading, Action | ReachedEnd | Collided { .. }) => None,
        (Idle, LoadComplete | ReachedEnd | Collided { .. }) => None,
        (Running, LoadComplete | Action) => None,
        (Won | Lost, LoadComplete | ReachedEnd | Collided { .. }) => None,
    }
}

/// Apply a trigger to the game, pushing any resulting notifications
///
/// Returns the new phase if a transition happened.
pub fn fire(state: &mut GameState, trigger: Trigger, events: &mut Vec<GameEvent>) -> Option<GamePhase> {
    let from = state.phase;
    let Some(to) = transition(from, trigger) else {
        log::trace!("Ignored {:?} in {:?}", trigger, from);
        return None;
    };

    match (from, to) {
        (GamePhase::Loading, GamePhase::Idle) => {
            state.ready_deadline = None;
            events.push(GameEvent::Ready);
        }
        (GamePhase::Idle, GamePhase::Running) => {
            events.push(GameEvent::Started);
        }
        (GamePhase::Running, GamePhase::Won) => {
            events.push(GameEvent::Won);
        }
        (GamePhase::Running, GamePhase::Lost) => {
            if let Trigger::Collided { obstacle_id } = trigger {
                log::debug!("Hit obstacle {} at translation {}", obstacle_id, state.field.translation);
                state.last_collision.obstacle_id = Some(obstacle_id);
                events.push(GameEvent::Collision { obstacle_id });
            }
        }
        (GamePhase::Won | GamePhase::Lost, GamePhase::Idle) => {
            let bounds = state.tuning.obstacle_bounds;
            field::reset(&mut state.field, bounds, &mut state.rng);
            state.player.reset();
            state.last_collision.obstacle_id = None;
            events.push(GameEvent::Reset);
        }
        _ => {}
    }

    log::info!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    Some(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec3;

    const ALL_PHASES: [GamePhase; 5] = [
        GamePhase::Loading,
        GamePhase::Idle,
        GamePhase::Running,
        GamePhase::Won,
        GamePhase::Lost,
    ];

    const ALL_TRIGGERS: [Trigger; 4] = [
        Trigger::LoadComplete,
        Trigger::Action,
        Trigger::ReachedEnd,
        Trigger::Collided { obstacle_id: 0 },
    ];

    fn small_state() -> GameState {
        GameState::new(Tuning {
            obstacle_count: 8,
            ring_count: 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_valid_transitions() {
        assert_eq!(transition(GamePhase::Loading, Trigger::LoadComplete), Some(GamePhase::Idle));
        assert_eq!(transition(GamePhase::Idle, Trigger::Action), Some(GamePhase::Running));
        assert_eq!(transition(GamePhase::Running, Trigger::ReachedEnd), Some(GamePhase::Won));
        assert_eq!(
            transition(GamePhase::Running, Trigger::Collided { obstacle_id: 4 }),
            Some(GamePhase::Lost)
        );
        assert_eq!(transition(GamePhase::Won, Trigger::Action), Some(GamePhase::Idle));
        assert_eq!(transition(GamePhase::Lost, Trigger::Action), Some(GamePhase::Idle));
    }

    #[test]
    fn test_everything_else_is_a_no_op() {
        let mut valid = 0;
        for phase in ALL_PHASES {
            for trigger in ALL_TRIGGERS {
                if transition(phase, trigger).is_some() {
                    valid += 1;
                }
            }
        }
        assert_eq!(valid, 6);
        assert_eq!(transition(GamePhase::Running, Trigger::Action), None);
        assert_eq!(transition(GamePhase::Loading, Trigger::Action), None);
    }

    #[test]
    fn test_fire_ignored_trigger_leaves_state() {
        let mut state = small_state();
        let mut events = Vec::new();
        assert_eq!(fire(&mut state, Trigger::Action, &mut events), None);
        assert_eq!(state.phase, GamePhase::Loading);
        assert!(events.is_empty());
    }

    #[test]
    fn test_loss_records_obstacle_and_restart_resets() {
        let mut state = small_state();
        let mut events = Vec::new();
        fire(&mut state, Trigger::LoadComplete, &mut events);
        fire(&mut state, Trigger::Action, &mut events);
        state.field.translation = 40.0;
        state.player.pos = Vec3::new(10.0, -5.0, 0.0);
        let before: Vec<Vec3> = state.field.obstacles.iter().map(|o| o.local_pos).collect();

        fire(&mut state, Trigger::Collided { obstacle_id: 2 }, &mut events);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.last_collision.obstacle_id, Some(2));

        fire(&mut state, Trigger::Action, &mut events);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.field.translation, 0.0);
        assert_eq!(state.player.pos, Vec3::ZERO);
        assert!(state.last_collision.obstacle_id.is_none());
        for (old, o) in before.iter().zip(&state.field.obstacles) {
            assert_eq!(old.z, o.local_pos.z);
            if o.is_collidable() {
                assert_ne!(old.truncate(), o.local_pos.truncate());
            }
        }

        assert_eq!(
            events,
            vec![
                GameEvent::Ready,
                GameEvent::Started,
                GameEvent::Collision { obstacle_id: 2 },
                GameEvent::Reset,
            ]
        );
    }
}

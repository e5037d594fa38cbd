//! Keyboard input mapping
//!
//! Key names follow `KeyboardEvent.key`. WASD (either case) and the arrow
//! keys steer; Space and Enter start or restart.

use std::collections::HashSet;

use crate::sim::{Direction, InputEvent};

/// What a physical key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    Move(Direction),
    Action,
}

/// Map a key name to its logical meaning
pub fn map_key(key: &str) -> Option<LogicalKey> {
    let logical = match key {
        "w" | "W" | "ArrowUp" => LogicalKey::Move(Direction::Up),
        "a" | "A" | "ArrowLeft" => LogicalKey::Move(Direction::Left),
        "s" | "S" | "ArrowDown" => LogicalKey::Move(Direction::Down),
        "d" | "D" | "ArrowRight" => LogicalKey::Move(Direction::Right),
        " " | "Enter" => LogicalKey::Action,
        _ => return None,
    };
    Some(logical)
}

/// Identity of a physical key regardless of Shift/Caps Lock
fn physical_id(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Turns raw key-down/key-up events into edge events, dropping auto-repeat
#[derive(Debug, Clone, Default)]
pub struct KeyRepeatFilter {
    held: HashSet<String>,
}

impl KeyRepeatFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down; `None` for unmapped keys and repeats of a held key
    pub fn key_down(&mut self, key: &str) -> Option<InputEvent> {
        let logical = map_key(key)?;
        if !self.held.insert(physical_id(key)) {
            return None;
        }
        Some(match logical {
            LogicalKey::Move(dir) => InputEvent::Pressed(dir),
            LogicalKey::Action => InputEvent::Action,
        })
    }

    /// Key-up; only direction keys produce an event
    pub fn key_up(&mut self, key: &str) -> Option<InputEvent> {
        let logical = map_key(key)?;
        if !self.held.remove(&physical_id(key)) {
            return None;
        }
        match logical {
            LogicalKey::Move(dir) => Some(InputEvent::Released(dir)),
            LogicalKey::Action => None,
        }
    }

    /// Release everything (window blur); returns the releases to deliver
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        self.held
            .drain()
            .filter_map(|key| match map_key(&key) {
                Some(LogicalKey::Move(dir)) => Some(InputEvent::Released(dir)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key("ArrowLeft"), Some(LogicalKey::Move(Direction::Left)));
        assert_eq!(map_key("D"), Some(LogicalKey::Move(Direction::Right)));
        assert_eq!(map_key(" "), Some(LogicalKey::Action));
        assert_eq!(map_key("q"), None);
    }

    #[test]
    fn test_repeat_suppressed() {
        let mut filter = KeyRepeatFilter::new();
        assert_eq!(filter.key_down("w"), Some(InputEvent::Pressed(Direction::Up)));
        assert_eq!(filter.key_down("w"), None);
        assert_eq!(filter.key_down("W"), None);
        assert_eq!(filter.key_up("W"), Some(InputEvent::Released(Direction::Up)));
        assert_eq!(filter.key_up("w"), None);
    }

    #[test]
    fn test_two_keys_same_direction() {
        let mut filter = KeyRepeatFilter::new();
        assert_eq!(filter.key_down("d"), Some(InputEvent::Pressed(Direction::Right)));
        assert_eq!(filter.key_down("ArrowRight"), Some(InputEvent::Pressed(Direction::Right)));
        assert_eq!(filter.key_up("d"), Some(InputEvent::Released(Direction::Right)));
    }

    #[test]
    fn test_action_has_no_release() {
        let mut filter = KeyRepeatFilter::new();
        assert_eq!(filter.key_down("Enter"), Some(InputEvent::Action));
        assert_eq!(filter.key_down("Enter"), None);
        assert_eq!(filter.key_up("Enter"), None);
        assert_eq!(filter.key_down("Enter"), Some(InputEvent::Action));
    }

    #[test]
    fn test_release_all() {
        let mut filter = KeyRepeatFilter::new();
        filter.key_down("a");
        filter.key_down("ArrowUp");
        filter.key_down(" ");
        let released = filter.release_all();
        assert_eq!(released.len(), 2);
        assert!(released.contains(&InputEvent::Released(Direction::Left)));
        assert!(released.contains(&InputEvent::Released(Direction::Up)));
        assert_eq!(filter.key_down("a"), Some(InputEvent::Pressed(Direction::Left)));
    }
}

//! Keyboard intent mapping.
//!
//! Translates UI key codes into game intents. Event wiring, dialog gating,
//! and animation settle windows are the caller's concern; this module only
//! defines the mapping contract:
//!
//! - Arrows / WASD → moves
//! - Space / Enter → new game
//! - Z / U → undo
//! - Escape → pause toggle

use crate::core::direction::Direction;

/// A player intent decoded from input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    NewGame,
    Undo,
    TogglePause,
}

/// Map a key code (browser `KeyboardEvent.code` convention) to an intent.
///
/// Unmapped keys return `None` and should pass through untouched.
#[must_use]
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "ArrowUp" | "KeyW" => Some(Intent::Move(Direction::Up)),
        "ArrowDown" | "KeyS" => Some(Intent::Move(Direction::Down)),
        "ArrowLeft" | "KeyA" => Some(Intent::Move(Direction::Left)),
        "ArrowRight" | "KeyD" => Some(Intent::Move(Direction::Right)),
        "Space" | "Enter" => Some(Intent::NewGame),
        "KeyZ" | "KeyU" => Some(Intent::Undo),
        "Escape" => Some(Intent::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_moves() {
        assert_eq!(intent_for_key("ArrowUp"), Some(Intent::Move(Direction::Up)));
        assert_eq!(intent_for_key("ArrowDown"), Some(Intent::Move(Direction::Down)));
        assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::Move(Direction::Left)));
        assert_eq!(intent_for_key("ArrowRight"), Some(Intent::Move(Direction::Right)));
    }

    #[test]
    fn test_wasd_aliases() {
        assert_eq!(intent_for_key("KeyW"), intent_for_key("ArrowUp"));
        assert_eq!(intent_for_key("KeyA"), intent_for_key("ArrowLeft"));
        assert_eq!(intent_for_key("KeyS"), intent_for_key("ArrowDown"));
        assert_eq!(intent_for_key("KeyD"), intent_for_key("ArrowRight"));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(intent_for_key("Space"), Some(Intent::NewGame));
        assert_eq!(intent_for_key("Enter"), Some(Intent::NewGame));
        assert_eq!(intent_for_key("KeyZ"), Some(Intent::Undo));
        assert_eq!(intent_for_key("KeyU"), Some(Intent::Undo));
        assert_eq!(intent_for_key("Escape"), Some(Intent::TogglePause));
    }

    #[test]
    fn test_unmapped_keys_pass_through() {
        assert_eq!(intent_for_key("KeyQ"), None);
        assert_eq!(intent_for_key("Tab"), None);
        assert_eq!(intent_for_key(""), None);
    }
}

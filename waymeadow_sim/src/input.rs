// Keyboard input state for avatar movement.
//
// `InputState` is the explicit "currently pressed" flag set: key press and
// release commands flip the flags, and the per-tick movement step reads them.
// It is a plain value, never a queue — nothing is consumed by reading it, and
// it is never iterated while being mutated (press/release and the movement
// tick are applied sequentially on the same thread).
//
// `pressed()` yields held directions in a fixed order (up, down, left,
// right) so the per-tick position update and the resulting facing are
// deterministic regardless of the order keys were pressed in.
//
// See also: `session.rs` for `advance_avatar()`, the pure per-tick step that
// consumes this state, `command.rs` for the key commands that mutate it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A movement direction. Doubles as the avatar's facing. The world is
/// screen-oriented: `Up` decreases y, `Down` increases it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the fixed polling order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit movement delta `(dx, dy)` in world units.
    pub fn delta(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// The set of currently held directional keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a direction as held. Idempotent (key repeat is harmless).
    pub fn press(&mut self, direction: Direction) {
        *self.flag_mut(direction) = true;
    }

    /// Mark a direction as released. Idempotent.
    pub fn release(&mut self, direction: Direction) {
        *self.flag_mut(direction) = false;
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Held directions in the fixed polling order.
    pub fn pressed(&self) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_pressed(*d))
            .collect()
    }

    fn flag_mut(&mut self, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_flip_flags() {
        let mut input = InputState::new();
        assert!(!input.is_pressed(Direction::Left));
        input.press(Direction::Left);
        assert!(input.is_pressed(Direction::Left));
        input.release(Direction::Left);
        assert!(!input.is_pressed(Direction::Left));
    }

    #[test]
    fn press_is_idempotent() {
        let mut input = InputState::new();
        input.press(Direction::Up);
        input.press(Direction::Up);
        assert_eq!(input.pressed().as_slice(), &[Direction::Up]);
        input.release(Direction::Up);
        assert!(input.pressed().is_empty());
    }

    #[test]
    fn pressed_order_is_fixed() {
        let mut input = InputState::new();
        // Press in reverse of the polling order.
        input.press(Direction::Right);
        input.press(Direction::Up);
        assert_eq!(input.pressed().as_slice(), &[Direction::Up, Direction::Right]);
    }

    #[test]
    fn deltas_are_screen_oriented() {
        assert_eq!(Direction::Up.delta(), (0.0, -1.0));
        assert_eq!(Direction::Down.delta(), (0.0, 1.0));
        assert_eq!(Direction::Left.delta(), (-1.0, 0.0));
        assert_eq!(Direction::Right.delta(), (1.0, 0.0));
    }

    #[test]
    fn input_state_serialization_roundtrip() {
        let mut input = InputState::new();
        input.press(Direction::Down);
        input.press(Direction::Right);
        let json = serde_json::to_string(&input).unwrap();
        let restored: InputState = serde_json::from_str(&json).unwrap();
        assert_eq!(input, restored);
    }
}

// Commands that drive player interaction.
//
// All player input reaches the session through `SessionCommand`: key presses
// and releases feeding the movement flag set, and sign interactions (open,
// submit). The session is advanced as `(state, commands) -> (state', events)`
// by `SessionState::step()`, which applies each command at its tick.
//
// Configuration mutation (adding blocks, paths, signs) is deliberately NOT a
// command: it is the explicit store API on `SessionState` (`add_tree_block`
// etc.), exposed for outer-layer scripting and debugging.
//
// See also: `session.rs` for `step()` and command dispatch, `input.rs` for
// the flag set key commands mutate, `event.rs` for the events emitted in
// response.
//
// **Critical constraint: determinism.** Commands are the sole external input
// to the session; identical command streams produce identical sessions.

use crate::input::Direction;
use crate::types::SignId;
use serde::{Deserialize, Serialize};

/// A player action targeting a specific session tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCommand {
    pub tick: u64,
    pub action: SessionAction,
}

/// The specific action a command performs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionAction {
    /// A directional key went down.
    KeyPressed { direction: Direction },
    /// A directional key came up.
    KeyReleased { direction: Direction },
    /// The player clicked a sign: show its additional info.
    OpenSign { sign: SignId },
    /// The player submitted the response box on a sign.
    SubmitResponse { sign: SignId, text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serialization_roundtrip() {
        let cmd = SessionCommand {
            tick: 17,
            action: SessionAction::SubmitResponse {
                sign: SignId(2),
                text: "my answer".into(),
            },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let restored: SessionCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, restored);
    }

    #[test]
    fn key_command_serialization_roundtrip() {
        let cmd = SessionCommand {
            tick: 0,
            action: SessionAction::KeyPressed {
                direction: Direction::Left,
            },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let restored: SessionCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, restored);
    }
}

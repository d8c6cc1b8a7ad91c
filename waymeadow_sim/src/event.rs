// Narrative events emitted by the session.
//
// `SessionEvent`s are the session's output channel: every observable state
// change produced by command processing emits one, stamped with the tick it
// happened at. The rendering layer and tests consume the stream; the core
// performs no logging or I/O of its own.
//
// See also: `session.rs` for the command dispatch that emits these,
// `command.rs` for the inputs they answer.

use crate::types::SignId;
use serde::{Deserialize, Serialize};

/// An observable event, for the UI / event log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub tick: u64,
    pub kind: SessionEventKind,
}

/// Types of events the session emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// An interactive sign was opened for the first time.
    SignOpened { sign: SignId },
    /// A response was recorded for a sign.
    ResponseRecorded { sign: SignId },
    /// The guide-naming sign changed the guide's display name.
    GuideRenamed { name: String },
}

// Core session state and tick loop.
//
// `SessionState` is the single source of truth for an exploration session. It
// owns the authored configuration (tree blocks, paths, signs), the per-sign
// phase map, the append-only response log, the guide display name, the input
// flag set, the avatar, and the tick counter. The session advances as a pure
// function: `(state, commands) -> (state', events)`.
//
// ## Tick loop
//
// Movement runs once per tick (the animation-frame cadence): `step()` walks
// tick by tick toward the target, applies the commands due at each tick, and
// then runs `advance_avatar()` — a pure step that moves the avatar for every
// held direction and clamps each axis to the world bounds unconditionally.
// Clamping is idempotent, not edge-triggered: a held key at a boundary leaves
// the position exactly on the bound, tick after tick.
//
// ## Configuration vs. interaction
//
// Two mutation surfaces, deliberately separate:
// - The store API (`add_tree_block`, `add_path`, `add_text_box`, `clear_all`)
//   appends or resets authored configuration. Each call bumps
//   `scenery_revision`, the key the rendering layer memoizes decoration
//   points on. This is the explicit replacement for window-scoped debug
//   hooks: the outermost application layer may bind these to a console.
// - Player interaction flows through `SessionCommand` and `step()`: key
//   presses and releases flip the input flags, `OpenSign` drives
//   `Unopened → InfoShown`, and `SubmitResponse` appends a tick-stamped
//   `ResponseRecord`, marks the sign `Responded`, and applies its
//   `ResponseEffect` (the guide-naming sign updates `guide_name`).
//
// Commands referencing unknown, decorative, or box-less signs are silent
// no-ops (idempotent, consistent with trusted-input command handling).
//
// ## Completion
//
// `check_completion()` is a read-only scan over the gradable, non-excluded
// signs. A sign is completed when its latest response is non-empty after
// trimming; resubmissions append and the latest record wins (highest tick,
// ties to the most recently appended). Required signs must each be
// completed; an alternative group is satisfied by any one member. Missing
// tasks are reported by label in sign order. On success, every gradable
// answered sign's grading function produces its feedback line, alongside the
// elapsed session time.
//
// `SessionState` is not serializable: signs carry grading function pointers,
// and nothing here persists beyond the in-memory session. The serializable
// surface is the data that crosses the rendering boundary — points, records,
// events, reports, config.
//
// See also: `command.rs` for `SessionCommand`, `event.rs` for the emitted
// events, `input.rs` for the flag set and `Direction`, `sign.rs` for sign
// variants and completion types, `scatter.rs` for the generators behind
// `scenery()`, `config.rs` for `WorldConfig`.
//
// **Critical constraint: determinism.** All state mutations flow through the
// store API or `step()`. No wall clock, no entropy — elapsed time is derived
// from the tick counter and the configured tick duration.

use crate::command::{SessionAction, SessionCommand};
use crate::config::WorldConfig;
use crate::event::{SessionEvent, SessionEventKind};
use crate::geometry::Path;
use crate::input::{Direction, InputState};
use crate::scatter::{self, TreeBlock};
use crate::sign::{
    CompletionOutcome, CompletionRule, ResponseEffect, ResponseRecord, Sign, SignFeedback,
    SignKind, SignPhase,
};
use crate::types::{SignId, WorldPoint};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The player-controlled sprite: where it is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub position: WorldPoint,
    pub facing: Direction,
}

/// The result of applying commands and advancing the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepResult {
    /// Events emitted during this step, for the UI / event log.
    pub events: Vec<SessionEvent>,
}

/// Top-level session state. This is the entire world.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Current session tick.
    pub tick: u64,

    /// Session configuration (immutable after initialization).
    pub config: WorldConfig,

    /// Authored tree blocks, in insertion order.
    pub blocks: Vec<TreeBlock>,

    /// Authored path corridors, in insertion order.
    pub paths: Vec<Path>,

    /// Authored signs; a `SignId` is an index into this list.
    pub signs: Vec<Sign>,

    /// Interaction phase per sign. Absent means `Unopened`. BTreeMap for
    /// deterministic iteration.
    pub phases: BTreeMap<SignId, SignPhase>,

    /// Append-only response log.
    pub responses: Vec<ResponseRecord>,

    /// Display name set by the guide-naming sign.
    pub guide_name: Option<String>,

    /// Currently held directional keys.
    pub input: InputState,

    /// The player-controlled sprite.
    pub avatar: Avatar,

    /// Bumped on every configuration change; the rendering layer memoizes
    /// decoration points on it.
    pub scenery_revision: u64,
}

impl SessionState {
    /// Create a new session with the given config.
    pub fn new(config: WorldConfig) -> Self {
        let (x, y) = config.avatar_start;
        Self {
            tick: 0,
            avatar: Avatar {
                position: WorldPoint::new(x, y),
                facing: Direction::default(),
            },
            config,
            blocks: Vec::new(),
            paths: Vec::new(),
            signs: Vec::new(),
            phases: BTreeMap::new(),
            responses: Vec::new(),
            guide_name: None,
            input: InputState::new(),
            scenery_revision: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Store API — configuration mutation
    // -----------------------------------------------------------------------

    /// Append a tree block.
    pub fn add_tree_block(&mut self, block: TreeBlock) {
        self.blocks.push(block);
        self.scenery_revision += 1;
    }

    /// Append a path corridor.
    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
        self.scenery_revision += 1;
    }

    /// Append a sign, returning its id.
    pub fn add_text_box(&mut self, sign: Sign) -> SignId {
        self.signs.push(sign);
        SignId(self.signs.len() as u32 - 1)
    }

    /// Reset the three configuration collections and all sign-derived state.
    pub fn clear_all(&mut self) {
        self.blocks.clear();
        self.paths.clear();
        self.signs.clear();
        self.phases.clear();
        self.responses.clear();
        self.guide_name = None;
        self.scenery_revision += 1;
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn sign(&self, id: SignId) -> Option<&Sign> {
        self.signs.get(id.0 as usize)
    }

    pub fn sign_phase(&self, id: SignId) -> SignPhase {
        self.phases.get(&id).copied().unwrap_or_default()
    }

    /// Read-only snapshot of the response log.
    pub fn sign_responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// The record that wins for a sign: highest tick, ties to the most
    /// recently appended.
    pub fn latest_response(&self, sign: SignId) -> Option<&ResponseRecord> {
        let mut latest: Option<&ResponseRecord> = None;
        for record in self.responses.iter().filter(|r| r.sign == sign) {
            if latest.is_none_or(|l| record.tick >= l.tick) {
                latest = Some(record);
            }
        }
        latest
    }

    /// A sign is completed once its latest response is non-empty after
    /// trimming.
    pub fn sign_completed(&self, sign: SignId) -> bool {
        self.latest_response(sign)
            .is_some_and(|r| !r.text.trim().is_empty())
    }

    /// Elapsed session time in seconds, derived from the tick counter.
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick as f64 * f64::from(self.config.tick_duration_ms) / 1000.0
    }

    /// All decoration points for the current configuration (blocks plus the
    /// border frame). Pure; the rendering layer memoizes this on
    /// `scenery_revision`.
    pub fn scenery(&self) -> Vec<WorldPoint> {
        scatter::scene_trees(&self.blocks, &self.paths)
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    /// Scan all gradable, non-excluded signs and report either the missing
    /// tasks or the graded success summary.
    pub fn check_completion(&self) -> CompletionOutcome {
        // First pass: alternative groups satisfied by any member.
        let mut satisfied_groups: FxHashSet<u32> = FxHashSet::default();
        for (idx, sign) in self.signs.iter().enumerate() {
            if !sign.counts_toward_completion() {
                continue;
            }
            if let SignKind::Interactive {
                rule: CompletionRule::AlternativeGroup(group),
                ..
            } = sign.kind
                && self.sign_completed(SignId(idx as u32))
            {
                satisfied_groups.insert(group);
            }
        }

        // Second pass: missing tasks, in sign order. Each unsatisfied group
        // is reported once, at its first member.
        let mut missing = Vec::new();
        let mut reported_groups: FxHashSet<u32> = FxHashSet::default();
        for (idx, sign) in self.signs.iter().enumerate() {
            if !sign.counts_toward_completion() {
                continue;
            }
            let SignKind::Interactive { rule, .. } = &sign.kind else {
                continue;
            };
            match *rule {
                CompletionRule::Required => {
                    if !self.sign_completed(SignId(idx as u32)) {
                        missing.push(sign.label());
                    }
                }
                CompletionRule::AlternativeGroup(group) => {
                    if !satisfied_groups.contains(&group) && reported_groups.insert(group) {
                        missing.push(sign.label());
                    }
                }
                CompletionRule::Excluded => {}
            }
        }
        if !missing.is_empty() {
            return CompletionOutcome::Incomplete { missing };
        }

        // Success: grade every answered gradable sign.
        let mut feedback = Vec::new();
        for (idx, sign) in self.signs.iter().enumerate() {
            let id = SignId(idx as u32);
            if !sign.counts_toward_completion() {
                continue;
            }
            let SignKind::Interactive {
                grading: Some(grade),
                ..
            } = &sign.kind
            else {
                continue;
            };
            let Some(record) = self.latest_response(id) else {
                continue;
            };
            if record.text.trim().is_empty() {
                continue;
            }
            feedback.push(SignFeedback {
                sign: id,
                label: sign.label(),
                response: record.text.clone(),
                feedback: grade(&record.text),
            });
        }
        CompletionOutcome::Complete {
            elapsed_seconds: self.elapsed_seconds(),
            feedback,
        }
    }

    // -----------------------------------------------------------------------
    // Tick loop
    // -----------------------------------------------------------------------

    /// Apply a batch of commands and advance the session to the target tick.
    ///
    /// Commands must be sorted by tick; commands with tick > `target_tick`
    /// are ignored (caller error). Movement runs every tick.
    pub fn step(&mut self, commands: &[SessionCommand], target_tick: u64) -> StepResult {
        let mut events = Vec::new();
        let mut cmd_idx = 0;

        // Commands already due at the current tick apply before any movement.
        self.drain_due(commands, &mut cmd_idx, &mut events);

        while self.tick < target_tick {
            self.tick += 1;
            self.drain_due(commands, &mut cmd_idx, &mut events);
            self.avatar = advance_avatar(self.avatar, &self.input, &self.config);
        }

        StepResult { events }
    }

    fn drain_due(
        &mut self,
        commands: &[SessionCommand],
        cmd_idx: &mut usize,
        events: &mut Vec<SessionEvent>,
    ) {
        while *cmd_idx < commands.len() && commands[*cmd_idx].tick <= self.tick {
            let cmd = commands[*cmd_idx].clone();
            *cmd_idx += 1;
            self.apply_command(&cmd, events);
        }
    }

    /// Apply a single command.
    fn apply_command(&mut self, cmd: &SessionCommand, events: &mut Vec<SessionEvent>) {
        match &cmd.action {
            SessionAction::KeyPressed { direction } => self.input.press(*direction),
            SessionAction::KeyReleased { direction } => self.input.release(*direction),
            SessionAction::OpenSign { sign } => self.open_sign(*sign, events),
            SessionAction::SubmitResponse { sign, text } => {
                self.submit_response(*sign, text, events);
            }
        }
    }

    /// `Unopened → InfoShown` for interactive signs. Silent no-op otherwise.
    fn open_sign(&mut self, id: SignId, events: &mut Vec<SessionEvent>) {
        let Some(sign) = self.signs.get(id.0 as usize) else {
            return;
        };
        if !sign.is_interactive() {
            return;
        }
        if self.sign_phase(id) == SignPhase::Unopened {
            self.phases.insert(id, SignPhase::InfoShown);
            events.push(SessionEvent {
                tick: self.tick,
                kind: SessionEventKind::SignOpened { sign: id },
            });
        }
    }

    /// Record a response for a sign offering a response box. Silent no-op
    /// otherwise.
    fn submit_response(&mut self, id: SignId, text: &str, events: &mut Vec<SessionEvent>) {
        let Some(sign) = self.signs.get(id.0 as usize) else {
            return;
        };
        let effect = match &sign.kind {
            SignKind::Interactive {
                has_response_box: true,
                effect,
                ..
            } => *effect,
            _ => return,
        };

        self.responses.push(ResponseRecord {
            sign: id,
            text: text.to_string(),
            tick: self.tick,
        });
        self.phases.insert(id, SignPhase::Responded);
        events.push(SessionEvent {
            tick: self.tick,
            kind: SessionEventKind::ResponseRecorded { sign: id },
        });

        if effect == ResponseEffect::SetGuideName {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                self.guide_name = Some(trimmed.to_string());
                events.push(SessionEvent {
                    tick: self.tick,
                    kind: SessionEventKind::GuideRenamed {
                        name: trimmed.to_string(),
                    },
                });
            }
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// One movement tick: move for every held direction, face the last one
/// applied, and clamp each axis to the world bounds unconditionally.
pub fn advance_avatar(mut avatar: Avatar, input: &InputState, config: &WorldConfig) -> Avatar {
    for direction in input.pressed() {
        let (dx, dy) = direction.delta();
        avatar.position.x += dx * config.avatar_speed;
        avatar.position.y += dy * config.avatar_speed;
        avatar.facing = direction;
    }

    // Clamping happens whether or not anything moved; it is idempotent.
    let (width, height) = config.world_size;
    avatar.position.x = avatar.position.x.clamp(0.0, width);
    avatar.position.y = avatar.position.y.clamp(0.0, height);
    avatar
}

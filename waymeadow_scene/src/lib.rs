// waymeadow_scene — render-ready scene assembly.
//
// Builds the read-only data the display collaborator consumes each frame: the
// combined decoration points (block trees plus the border frame), the
// stepping-stone centers along every path, each sign's display state
// (including the completion-dimmed flag), the avatar pose, the guide name,
// and the elapsed session time. A `Scene` is a detached value — nothing in it
// aliases session state, and the session is never mutated from here.
//
// Decoration points are expensive enough to memoize: `SceneryCache` keys the
// generated vector on the session's `scenery_revision`, so rebuilding a scene
// when nothing was reconfigured reuses the cached points (shared via `Arc`)
// and regeneration happens exactly once per configuration change.
//
// See also: the `waymeadow_sim` crate for all session logic, `scatter.rs`
// there for the generators this crate caches, `session.rs` for the revision
// counter and sign phase accessors.

use rustc_hash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use waymeadow_sim::geometry::Path;
use waymeadow_sim::input::Direction;
use waymeadow_sim::session::SessionState;
use waymeadow_sim::sign::{SignKind, SignPhase};
use waymeadow_sim::types::{SignId, WorldPoint, round2};

/// Distance between stepping-stone centers along a path corridor.
pub const STONE_INTERVAL: f64 = 40.0;

/// Memoized decoration points, keyed on the session's scenery revision.
///
/// Old revisions never recur (the counter is monotonic), so the cache keeps
/// only the current entry.
#[derive(Clone, Debug, Default)]
pub struct SceneryCache {
    entries: FxHashMap<u64, Arc<Vec<WorldPoint>>>,
}

impl SceneryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoration points for the session's current configuration,
    /// generating them only when the revision is new.
    pub fn points(&mut self, session: &SessionState) -> Arc<Vec<WorldPoint>> {
        let revision = session.scenery_revision;
        let points = self
            .entries
            .entry(revision)
            .or_insert_with(|| Arc::new(session.scenery()))
            .clone();
        self.entries.retain(|rev, _| *rev == revision);
        points
    }
}

/// Display state for a single sign.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignDisplay {
    pub sign: SignId,
    pub text: String,
    pub font_size: f64,
    pub top: f64,
    pub left: f64,
    /// Extra text revealed on open, for interactive signs.
    pub additional_info: Option<String>,
    pub has_response_box: bool,
    pub title: Option<String>,
    pub phase: SignPhase,
    /// Set once the sign has a non-empty recorded response; the renderer
    /// dims completed signs.
    pub dimmed: bool,
}

/// The avatar as the renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvatarPose {
    pub position: WorldPoint,
    pub facing: Direction,
}

/// Everything the display collaborator needs for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    /// All decoration points: block trees in authored order, then the border
    /// frame.
    pub decorations: Vec<WorldPoint>,
    /// Stepping-stone centers, per path in authored order. Decorative
    /// overlay only — gameplay never reads these.
    pub stones: Vec<WorldPoint>,
    pub signs: Vec<SignDisplay>,
    pub avatar: AvatarPose,
    pub guide_name: Option<String>,
    pub elapsed_seconds: f64,
}

impl Scene {
    /// Assemble a scene from the session, reusing cached decoration points
    /// when the configuration has not changed.
    pub fn build(session: &SessionState, cache: &mut SceneryCache) -> Self {
        let decorations = cache.points(session).as_ref().clone();

        let stones = session
            .paths
            .iter()
            .flat_map(stepping_stones)
            .collect();

        let signs = session
            .signs
            .iter()
            .enumerate()
            .map(|(idx, sign)| {
                let id = SignId(idx as u32);
                let (additional_info, has_response_box, title) = match &sign.kind {
                    SignKind::Interactive {
                        additional_info,
                        has_response_box,
                        title,
                        ..
                    } => (additional_info.clone(), *has_response_box, title.clone()),
                    SignKind::Decorative => (None, false, None),
                };
                SignDisplay {
                    sign: id,
                    text: sign.text.clone(),
                    font_size: sign.font_size,
                    top: sign.top,
                    left: sign.left,
                    additional_info,
                    has_response_box,
                    title,
                    phase: session.sign_phase(id),
                    dimmed: has_response_box && session.sign_completed(id),
                }
            })
            .collect();

        Self {
            decorations,
            stones,
            signs,
            avatar: AvatarPose {
                position: session.avatar.position,
                facing: session.avatar.facing,
            },
            guide_name: session.guide_name.clone(),
            elapsed_seconds: session.elapsed_seconds(),
        }
    }
}

/// Stepping-stone centers along a path: one stone every `STONE_INTERVAL`
/// world units down the corridor centerline, rotated into world space.
pub fn stepping_stones(path: &Path) -> Vec<WorldPoint> {
    let theta = path.angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let mut stones = Vec::new();
    let mut k = 0u32;
    loop {
        let u = f64::from(k) * STONE_INTERVAL + STONE_INTERVAL / 2.0;
        if u > path.length {
            break;
        }
        stones.push(WorldPoint::new(
            round2(path.left + u * cos),
            round2(path.top + u * sin),
        ));
        k += 1;
    }
    stones
}

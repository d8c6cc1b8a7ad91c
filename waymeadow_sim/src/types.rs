// Core types shared across the session.
//
// Defines world coordinates (`WorldPoint`), the compact sign identifier
// (`SignId`), and the 2-decimal rounding primitive that every generated
// coordinate passes through. All types derive `Serialize` and `Deserialize`
// so they can cross the rendering boundary as plain data.
//
// The coordinate system is screen-style: x grows rightward, y grows
// *downward*, and `top`/`left` anchors name the minimum corner of a rectangle.
//
// **Critical constraint: determinism.** `round2` is part of the
// reproducibility contract, not cosmetics — rounding generated coordinates to
// exactly 2 decimals keeps floating-point drift from accumulating differences
// between otherwise-identical runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved position in the 2D world, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point with both coordinates rounded to 2 decimals.
    pub fn rounded(self) -> Self {
        Self {
            x: round2(self.x),
            y: round2(self.y),
        }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Round to exactly 2 decimal places, half away from zero.
///
/// Re-rounding an already-rounded value is a no-op.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Sign identifier — compact integer, not a UUID
// ---------------------------------------------------------------------------

/// Identifier for a sign: its index in the session's sign list. Signs are
/// authored configuration appended in order and never removed individually,
/// so the index is stable for the life of the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignId(pub u32);

impl fmt::Display for SignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignId({})", self.0)
    }
}

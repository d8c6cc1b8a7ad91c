// Path corridors and the rotated-rectangle containment test.
//
// A `Path` is a movement corridor rendered as a stepping-stone trail: a rigid
// rotated rectangle of `length × width`, anchored at `(left, top)` — the
// midpoint of its near edge — and rotated `angle_deg` degrees clockwise from
// the positive x-axis around that anchor. `contains()` is the geometric test
// that keeps scattered trees off the corridor.
//
// The containment works in the path's local frame: translate the point by the
// anchor, apply the inverse rotation, and test the axis-aligned local
// coordinates. `u` runs along the corridor (`0..=length`), `v = 0` is the
// centerline (`|v| <= width / 2`). Edge-inclusive; no epsilon is applied, so
// floating-point boundary cases resolve however the trigonometry lands.
//
// See also: `scatter.rs` which filters generated trees through `contains()`,
// `types.rs` for `WorldPoint`.

use crate::types::WorldPoint;
use serde::{Deserialize, Serialize};

/// A rotated rectangular corridor kept clear of decoration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Corridor length along its axis. Positive.
    pub length: f64,
    /// Corridor thickness. Positive.
    pub width: f64,
    /// Anchor y: the corridor's start, at the midpoint of its near edge.
    pub top: f64,
    /// Anchor x.
    pub left: f64,
    /// Rotation in degrees, clockwise from the positive x-axis, pivoting at
    /// the anchor.
    pub angle_deg: f64,
}

impl Path {
    /// Construct a path, rejecting malformed geometry.
    ///
    /// Panics if `length` or `width` is not strictly positive, or any field
    /// is non-finite. Precondition violations are programmer errors.
    pub fn new(length: f64, width: f64, top: f64, left: f64, angle_deg: f64) -> Self {
        assert!(
            length.is_finite() && length > 0.0,
            "Path::new: length must be strictly positive"
        );
        assert!(
            width.is_finite() && width > 0.0,
            "Path::new: width must be strictly positive"
        );
        assert!(
            top.is_finite() && left.is_finite() && angle_deg.is_finite(),
            "Path::new: anchor and angle must be finite"
        );
        Self {
            length,
            width,
            top,
            left,
            angle_deg,
        }
    }

    /// Rotated-rectangle containment test, edge-inclusive.
    pub fn contains(&self, point: WorldPoint) -> bool {
        let theta = self.angle_deg.to_radians();
        let (sin, cos) = theta.sin_cos();
        let dx = point.x - self.left;
        let dy = point.y - self.top;
        // Inverse rotation into the corridor's local frame.
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        (0.0..=self.length).contains(&u) && v.abs() <= self.width / 2.0
    }
}

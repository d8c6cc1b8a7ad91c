// Procedural tree scattering.
//
// Two generators produce the world's decoration points:
//
// - `generate_block_trees()` scatters trees over a rectangular block by
//   walking a regular grid and jittering each cell, discarding points that
//   land outside the block or inside any path corridor.
// - `generate_border_trees()` builds the fixed frame of trees surrounding the
//   playable world, layer by layer, so the avatar never sees empty space at
//   the world's edges. It takes no parameters and returns the same sequence
//   on every call.
//
// All jitter comes from `waymeadow_noise`, seeded by the block's own geometry
// (`left*1000 + top*100 + width + length`) or by the border's fixed seed and
// a per-point counter. Seeding by geometry rather than an external counter
// means two identically-configured blocks scatter identically regardless of
// when they were added — callers rely on this when regenerating the whole
// scene on any configuration change. Every coordinate is rounded to 2
// decimals before the keep/discard decision (see `types::round2`).
//
// See also: `geometry.rs` for the corridor containment filter, `session.rs`
// which owns the authored blocks and paths, `config.rs` for the fixed world
// frame the border wraps.
//
// **Critical constraint: determinism.** Generation is a pure function of its
// arguments (and fixed constants). No entropy, no stored state, no
// incremental updates — output is recomputed wholesale and must be identical
// across runs, including order.

use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::geometry::Path;
use crate::types::{WorldPoint, round2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use waymeadow_noise::noise;

/// Fixed seed for the border frame. Not configuration: changing it changes
/// every session's border identically.
pub const BORDER_SEED: f64 = 4242.0;

/// Nominal spacing between border trees, in world units.
pub const BORDER_SPACING: f64 = 60.0;

/// How far the border frame extends outward from the world edge.
pub const BORDER_DEPTH: f64 = 180.0;

/// Jitter amplitude as a fraction of spacing: ±20% of a cell each axis.
const JITTER_SPAN: f64 = 0.4;

/// A rectangular region eligible for tree scattering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeBlock {
    /// Vertical extent. Positive.
    pub length: f64,
    /// Horizontal extent. Positive.
    pub width: f64,
    /// Trees per 100 world units. Strictly positive.
    pub density: f64,
    /// Top-left anchor y. No rotation.
    pub top: f64,
    /// Top-left anchor x.
    pub left: f64,
}

impl TreeBlock {
    /// Construct a block, rejecting malformed geometry.
    ///
    /// Panics if `density`, `length`, or `width` is not strictly positive, or
    /// any field is non-finite. A non-positive density would otherwise divide
    /// the grid spacing to infinity; precondition violations are programmer
    /// errors.
    pub fn new(length: f64, width: f64, density: f64, top: f64, left: f64) -> Self {
        assert!(
            density.is_finite() && density > 0.0,
            "TreeBlock::new: density must be strictly positive"
        );
        assert!(
            length.is_finite() && length > 0.0,
            "TreeBlock::new: length must be strictly positive"
        );
        assert!(
            width.is_finite() && width > 0.0,
            "TreeBlock::new: width must be strictly positive"
        );
        assert!(
            top.is_finite() && left.is_finite(),
            "TreeBlock::new: anchor must be finite"
        );
        Self {
            length,
            width,
            density,
            top,
            left,
        }
    }

    /// Grid spacing implied by the density: `100 / density`.
    pub fn spacing(&self) -> f64 {
        100.0 / self.density
    }

    /// Seed derived from the block's own geometry, so identical blocks
    /// scatter identically wherever and whenever they are added.
    pub fn seed(&self) -> f64 {
        self.left * 1000.0 + self.top * 100.0 + self.width + self.length
    }

    /// Edge-inclusive test against the block's own rectangle.
    fn covers(&self, point: WorldPoint) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.length
    }
}

/// Scatter trees over a block, keeping clear of every supplied path.
///
/// Deterministic and restartable: identical arguments yield an identical
/// sequence, same points in the same grid-walk order (columns outer, rows
/// inner).
pub fn generate_block_trees(block: &TreeBlock, paths: &[Path]) -> Vec<WorldPoint> {
    let spacing = block.spacing();
    let seed = block.seed();
    let mut points = Vec::new();

    // i-th visited grid cell, x-major; feeds the per-cell sub-seeds, so the
    // walk order is part of the contract.
    let mut cell = 0u32;
    let mut col = 0u32;
    loop {
        let x = block.left + f64::from(col) * spacing;
        if x >= block.left + block.width {
            break;
        }
        let mut row = 0u32;
        loop {
            let y = block.top + f64::from(row) * spacing;
            if y >= block.top + block.length {
                break;
            }

            let i = f64::from(cell);
            let jx = (noise(seed + i * 11.0) - 0.5) * spacing * JITTER_SPAN;
            let jy = (noise(seed + i * 13.0 + 1000.0) - 0.5) * spacing * JITTER_SPAN;
            cell += 1;

            let point = WorldPoint::new(round2(x + jx), round2(y + jy));

            // Jitter can push a point past the block edge near the boundary.
            if block.covers(point) && !paths.iter().any(|p| p.contains(point)) {
                points.push(point);
            }

            row += 1;
        }
        col += 1;
    }

    points
}

/// Build the fixed frame of trees surrounding the playable world.
///
/// No parameters: fixed world extent, fixed seed, fixed spacing. Layers step
/// outward by half the spacing (staggered, overlapping rings); each layer
/// emits four rows — top, bottom, left, right — and every point is jittered
/// on both axes from a counter that increments once per point across all
/// sides and layers. Border trees are never filtered against paths.
pub fn generate_border_trees() -> Vec<WorldPoint> {
    let step = BORDER_SPACING / 2.0;
    let layers = (BORDER_DEPTH / step) as u32;
    let mut points = Vec::new();
    let mut counter = 0u32;

    let jittered = |x: f64, y: f64, counter: &mut u32| {
        let c = f64::from(*counter);
        *counter += 1;
        let jx = (noise(BORDER_SEED + c * 11.0) - 0.5) * BORDER_SPACING * JITTER_SPAN;
        let jy = (noise(BORDER_SEED + c * 13.0 + 1000.0) - 0.5) * BORDER_SPACING * JITTER_SPAN;
        WorldPoint::new(round2(x + jx), round2(y + jy))
    };

    // Row sweeps cover the corners: horizontal rows span the frame width,
    // vertical rows span the frame height.
    let sweep = |extent: f64| -> Vec<f64> {
        let mut positions = Vec::new();
        let mut k = 0u32;
        loop {
            let pos = -BORDER_DEPTH + f64::from(k) * BORDER_SPACING;
            if pos > extent + BORDER_DEPTH {
                break;
            }
            positions.push(pos);
            k += 1;
        }
        positions
    };
    let xs = sweep(WORLD_WIDTH);
    let ys = sweep(WORLD_HEIGHT);

    for ring in 0..=layers {
        let layer = f64::from(ring) * step;
        for &x in &xs {
            points.push(jittered(x, -layer, &mut counter));
        }
        for &x in &xs {
            points.push(jittered(x, WORLD_HEIGHT + layer, &mut counter));
        }
        for &y in &ys {
            points.push(jittered(-layer, y, &mut counter));
        }
        for &y in &ys {
            points.push(jittered(WORLD_WIDTH + layer, y, &mut counter));
        }
    }

    points
}

/// All decoration points for a scene: every block's trees (generated in
/// parallel, deterministic order preserved) followed by the border frame.
pub fn scene_trees(blocks: &[TreeBlock], paths: &[Path]) -> Vec<WorldPoint> {
    let per_block: Vec<Vec<WorldPoint>> = blocks
        .par_iter()
        .map(|block| generate_block_trees(block, paths))
        .collect();

    let mut points: Vec<WorldPoint> = per_block.into_iter().flatten().collect();
    points.extend(generate_border_trees());
    points
}

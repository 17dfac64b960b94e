//! Viewport visibility: which cells are within sight of a reference point.

use cellgate_protocol::CellPoint;
use serde::{Deserialize, Serialize};

/// Per-cell visibility, derived from a reference position and a fixed
/// Manhattan-distance radius.
///
/// Recomputed in full on every move rather than patched incrementally —
/// the grid is small (8×8 in the observed protocol) and recomputation only
/// happens on player movement, so the simple form wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportFilter {
    cx: usize,
    cy: usize,
    visible: Vec<bool>,
}

impl ViewportFilter {
    /// An empty filter for when no map is loaded yet.
    pub fn empty() -> Self {
        Self {
            cx: 0,
            cy: 0,
            visible: Vec::new(),
        }
    }

    /// Computes visibility for a `cx` × `cy` grid: a cell is visible iff
    /// its Manhattan distance to `reference` is at most `radius`.
    pub fn compute(
        reference: CellPoint,
        radius: i32,
        cx: usize,
        cy: usize,
    ) -> Self {
        let mut visible = Vec::with_capacity(cx * cy);
        for y in 0..cy {
            for x in 0..cx {
                let cell = CellPoint::new(x as i32, y as i32);
                visible.push(cell.manhattan(reference) <= radius);
            }
        }
        Self { cx, cy, visible }
    }

    /// Whether the cell at `pt` is visible. Cells outside the grid are not.
    pub fn is_visible(&self, pt: CellPoint) -> bool {
        if !pt.inside(self.cx as i32, self.cy as i32) {
            return false;
        }
        self.visible[pt.x as usize + pt.y as usize * self.cx]
    }

    /// Count of visible cells.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

// =========================================================================
// Tests
// =========================================================================

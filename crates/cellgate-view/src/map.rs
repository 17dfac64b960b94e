//! The static map grid.

use cellgate_protocol::CellPoint;
use serde::{Deserialize, Serialize};

use crate::ViewError;

/// Classification of one map cell.
///
/// The marker alphabet is open-ended: `'W'` is a wall, everything else
/// (including the server's `'?'` spawn markers) renders as open ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    /// Classifies one marker character from the wire.
    pub fn classify(marker: char) -> Cell {
        match marker {
            'W' => Cell::Wall,
            _ => Cell::Open,
        }
    }
}

/// The walkable/blocked cell layout, replaced wholesale per `map` packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGrid {
    cx: usize,
    cells: Vec<Cell>,
}

impl MapGrid {
    /// Parses a row-major marker string into a grid of `cx` columns.
    ///
    /// # Errors
    /// [`ViewError::MalformedMap`] if the cell count doesn't divide into
    /// whole rows; [`ViewError::ZeroWidthMap`] if `cx` is zero.
    pub fn parse(cx: usize, cells: &str) -> Result<MapGrid, ViewError> {
        if cx == 0 {
            return Err(ViewError::ZeroWidthMap);
        }
        let markers: Vec<Cell> = cells.chars().map(Cell::classify).collect();
        if markers.len() % cx != 0 {
            return Err(ViewError::MalformedMap {
                cx,
                len: markers.len(),
            });
        }
        Ok(MapGrid { cx, cells: markers })
    }

    /// Number of columns.
    pub fn cx(&self) -> usize {
        self.cx
    }

    /// Number of rows, derived from the cell count.
    pub fn cy(&self) -> usize {
        self.cells.len() / self.cx
    }

    /// The cell at a position, or `None` outside the grid.
    pub fn cell(&self, pt: CellPoint) -> Option<Cell> {
        if !pt.inside(self.cx as i32, self.cy() as i32) {
            return None;
        }
        Some(self.cells[pt.x as usize + pt.y as usize * self.cx])
    }

    /// `true` if the position is inside the grid and not a wall.
    pub fn walkable(&self, pt: CellPoint) -> bool {
        self.cell(pt) == Some(Cell::Open)
    }
}

// =========================================================================
// Tests
// =========================================================================

//! Core vocabulary of the wire protocol.
//!
//! Everything here is fixed by the server: the numeric direction codes, the
//! movement-phase codes, the spell identifiers. The client must encode and
//! decode them identically or positions silently drift.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A server-assigned identifier for a visible object (another player, or
/// this client's own avatar).
///
/// Newtype over `u32` so an object id can't be confused with a coordinate
/// or a wire code. `#[serde(transparent)]` keeps the JSON form a plain
/// number, which is what the server sends in the `id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal directions.
///
/// The wire carries directions as numbers. The mapping is part of the
/// protocol contract and must be identical on the encode and decode paths:
///
/// ```text
/// right = 0    up = 1    left = 2    down = 3
/// ```
///
/// `#[serde(try_from = "u8", into = "u8")]` makes the JSON form exactly
/// that number; an out-of-range code is a decode error, not a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dir {
    Right,
    Up,
    Left,
    Down,
}

impl Dir {
    /// All directions, in wire-code order.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Up, Dir::Left, Dir::Down];

    /// The numeric wire code for this direction.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The symbolic token used by local input ("right", "up", ...).
    pub fn token(self) -> &'static str {
        match self {
            Dir::Right => "right",
            Dir::Up => "up",
            Dir::Left => "left",
            Dir::Down => "down",
        }
    }

    /// Parses a symbolic direction token. Returns `None` for anything
    /// outside the fixed vocabulary.
    pub fn from_token(token: &str) -> Option<Dir> {
        match token {
            "right" => Some(Dir::Right),
            "up" => Some(Dir::Up),
            "left" => Some(Dir::Left),
            "down" => Some(Dir::Down),
            _ => None,
        }
    }

    /// The unit displacement for one movement step in this direction.
    ///
    /// The grid's y axis grows downward, so `Up` is `y - 1`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Left => (-1, 0),
            Dir::Down => (0, 1),
        }
    }
}

impl TryFrom<u8> for Dir {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Dir::Right),
            1 => Ok(Dir::Up),
            2 => Ok(Dir::Left),
            3 => Ok(Dir::Down),
            other => Err(ProtocolError::InvalidDirectionCode(other)),
        }
    }
}

impl From<Dir> for u8 {
    fn from(dir: Dir) -> u8 {
        dir.code()
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ---------------------------------------------------------------------------
// Movement phase
// ---------------------------------------------------------------------------

/// The movement animation phase of a visible object.
///
/// State machine driven entirely by server events:
///
/// ```text
///   Idle ──(see_begin_move)──→ MovingOut ──(see_cross_cell)──→ MovingIn
///     ↑                                                            │
///     └───────────────────────(see_stop)──────────────────────────┘
/// ```
///
/// Wire codes: `0` Idle, `1` MovingOut, `2` MovingIn (the `state` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Phase {
    /// Stationary in its cell.
    #[default]
    Idle,
    /// Animating out of the departure cell.
    MovingOut,
    /// Animating into the destination cell.
    MovingIn,
}

impl Phase {
    /// The numeric wire code for this phase.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Phase {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Phase::Idle),
            1 => Ok(Phase::MovingOut),
            2 => Ok(Phase::MovingIn),
            other => Err(ProtocolError::InvalidPhaseCode(other)),
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase.code()
    }
}

// ---------------------------------------------------------------------------
// Spells
// ---------------------------------------------------------------------------

/// The fixed spell vocabulary.
///
/// Wire codes: `0` lightning (cell-targeted), `1` heal (self-targeted).
/// The same codes appear in outgoing `cast` commands and in incoming
/// `see_cast` / `see_effect` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Spell {
    Lightning,
    Heal,
}

impl Spell {
    /// The numeric wire code for this spell.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The symbolic token used by local input.
    pub fn token(self) -> &'static str {
        match self {
            Spell::Lightning => "lightning",
            Spell::Heal => "heal",
        }
    }

    /// Parses a symbolic spell token. Returns `None` for anything outside
    /// the fixed vocabulary.
    pub fn from_token(token: &str) -> Option<Spell> {
        match token {
            "lightning" => Some(Spell::Lightning),
            "heal" => Some(Spell::Heal),
            _ => None,
        }
    }

    /// `true` if the spell targets the caster and carries no target
    /// descriptor on the wire.
    pub fn self_targeted(self) -> bool {
        matches!(self, Spell::Heal)
    }
}

impl TryFrom<u8> for Spell {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Spell::Lightning),
            1 => Ok(Spell::Heal),
            other => Err(ProtocolError::InvalidSpellCode(other)),
        }
    }
}

impl From<Spell> for u8 {
    fn from(spell: Spell) -> u8 {
        spell.code()
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ---------------------------------------------------------------------------
// Grid coordinates
// ---------------------------------------------------------------------------

/// A cell position on the map grid.
///
/// Coordinates are held as `i32` so a displacement can be applied before
/// bounds are considered, but every position the server reports is
/// non-negative and inside the current map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPoint {
    pub x: i32,
    pub y: i32,
}

impl CellPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn step(self, dir: Dir) -> CellPoint {
        let (dx, dy) = dir.offset();
        CellPoint::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another cell (sum of absolute coordinate
    /// differences) — the metric the viewport filter uses.
    pub fn manhattan(self, other: CellPoint) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// `true` if the point lies within a `cx` × `cy` grid.
    pub fn inside(self, cx: i32, cy: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < cx && self.y < cy
    }
}

impl fmt::Display for CellPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =========================================================================
// Tests
// =========================================================================

//! Transient spell effects.
//!
//! Effects exist only to be shown briefly: the server announces them with
//! `see_effect`, and the client removes them again after a TTL. Each entry
//! gets a monotonically increasing sequence number so a fire-once expiry
//! timer can name exactly the entry it was armed for — expiring a sequence
//! that is already gone is a harmless no-op.

use cellgate_protocol::{CellPoint, Spell};
use serde::{Deserialize, Serialize};

/// Identifies one spawned effect instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct EffectSeq(pub u64);

/// One transient effect currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub seq: EffectSeq,
    pub pos: CellPoint,
    pub effect: Spell,
}

/// The set of effects currently on display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectBoard {
    next_seq: u64,
    active: Vec<ActiveEffect>,
}

impl EffectBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect and returns its sequence number for expiry
    /// scheduling.
    pub fn spawn(&mut self, pos: CellPoint, effect: Spell) -> EffectSeq {
        let seq = EffectSeq(self.next_seq);
        self.next_seq += 1;
        self.active.push(ActiveEffect { seq, pos, effect });
        seq
    }

    /// Removes the effect with the given sequence. Returns `false` if it
    /// was already gone.
    pub fn expire(&mut self, seq: EffectSeq) -> bool {
        let before = self.active.len();
        self.active.retain(|e| e.seq != seq);
        self.active.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drops every active effect, e.g. when a new session starts.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

// =========================================================================
// Tests
// =========================================================================

//! `WorldView` — the whole local projection of server state.
//!
//! Owns the object roster, the map grid, the viewport filter, and the
//! transient effect board. The protocol handler mutates server state
//! exclusively through this type; in particular the movement-step
//! computation (`advance`) reads the stored position/direction back from
//! here rather than keeping its own shadow copy, so display state and
//! step computation can never drift apart.

use cellgate_protocol::{CellPoint, Dir, ObjectId, Phase, Spell};

use crate::{
    EffectBoard, EffectSeq, MapGrid, ObjectPatch, RemoteObject, Roster,
    ViewError, ViewportFilter,
};

/// Default visibility radius, in Manhattan distance.
pub const DEFAULT_VIEW_RADIUS: i32 = 2;

/// The complete local model of visible game state.
#[derive(Debug, Clone)]
pub struct WorldView {
    roster: Roster,
    map: Option<MapGrid>,
    filter: ViewportFilter,
    effects: EffectBoard,
    own_id: Option<ObjectId>,
    view_radius: i32,
}

impl Default for WorldView {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_RADIUS)
    }
}

impl WorldView {
    pub fn new(view_radius: i32) -> Self {
        Self {
            roster: Roster::new(),
            map: None,
            filter: ViewportFilter::empty(),
            effects: EffectBoard::new(),
            own_id: None,
            view_radius,
        }
    }

    /// Whether `id` is the own avatar.
    fn is_own(&self, id: ObjectId) -> bool {
        self.own_id == Some(id)
    }

    // -- Object lifecycle -------------------------------------------------

    /// Inserts or partially updates an object.
    pub fn add_or_update(
        &mut self,
        id: ObjectId,
        spawn_pos: CellPoint,
        patch: ObjectPatch,
    ) {
        self.roster.upsert(id, spawn_pos, patch);
        if self.is_own(id) {
            self.refresh_visibility();
        }
    }

    /// Records which object is this client's own avatar and (re)computes
    /// visibility around it.
    pub fn mark_own(&mut self, id: ObjectId) {
        self.own_id = Some(id);
        self.refresh_visibility();
    }

    /// Removes an object. Tolerated no-op when absent.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.roster.remove(id)
    }

    // -- Movement ---------------------------------------------------------

    /// Applies a `see_begin_move`: direction set, phase → MovingOut,
    /// position untouched.
    pub fn begin_move(&mut self, id: ObjectId, dir: Dir) -> bool {
        self.roster
            .patch(id, ObjectPatch::default().dir(dir).phase(Phase::MovingOut))
    }

    /// Applies a movement step: reads the object's displayed position and
    /// direction back, advances one cell, and sets phase → MovingIn.
    ///
    /// Returns the new position, or `None` if the id is unknown. If a step
    /// packet is ever dropped by the transport, the position computed here
    /// diverges from the server's until the next full snapshot; that risk
    /// is inherent to the wire format and not mitigated locally.
    pub fn advance(&mut self, id: ObjectId) -> Option<CellPoint> {
        let obj = self.roster.get_mut(id)?;
        let dest = obj.pos.step(obj.dir);
        obj.pos = dest;
        obj.phase = Phase::MovingIn;
        if self.is_own(id) {
            self.refresh_visibility();
        }
        Some(dest)
    }

    /// Applies a `see_stop`: phase → Idle.
    pub fn stop(&mut self, id: ObjectId) -> bool {
        self.roster.patch(id, ObjectPatch::default().phase(Phase::Idle))
    }

    /// Overwrites an object's stored coordinates.
    pub fn set_position(&mut self, id: ObjectId, pos: CellPoint) -> bool {
        let touched = self.roster.patch(id, ObjectPatch::default().pos(pos));
        if touched && self.is_own(id) {
            self.refresh_visibility();
        }
        touched
    }

    // -- Casting and health -----------------------------------------------

    /// Marks an object as casting `spell`.
    pub fn begin_cast(&mut self, id: ObjectId, spell: Spell) -> bool {
        self.roster
            .patch(id, ObjectPatch::default().spell(Some(spell)))
    }

    /// Clears an object's active spell.
    pub fn end_cast(&mut self, id: ObjectId) -> bool {
        self.roster.patch(id, ObjectPatch::default().spell(None))
    }

    /// Updates the own avatar's hit points (`hp_change` carries no id).
    /// Returns `false` if no own avatar is known yet.
    pub fn set_own_hp(&mut self, hp: i32) -> bool {
        match self.own_id {
            Some(id) => self.roster.patch(id, ObjectPatch::default().hp(hp)),
            None => false,
        }
    }

    // -- Map and visibility -----------------------------------------------

    /// Replaces the map grid wholesale.
    ///
    /// # Errors
    /// Propagates [`MapGrid::parse`] failures; the previous grid (and the
    /// current viewport filter) are kept untouched on error.
    pub fn load_map(&mut self, cx: usize, cells: &str) -> Result<(), ViewError> {
        let grid = MapGrid::parse(cx, cells)?;
        tracing::debug!(cx, cy = grid.cy(), "map grid replaced");
        self.map = Some(grid);
        self.refresh_visibility();
        Ok(())
    }

    /// Full recomputation of the viewport filter from the own avatar's
    /// position. Empty when no map or no own avatar exists yet.
    pub fn refresh_visibility(&mut self) {
        let reference = self
            .own_id
            .and_then(|id| self.roster.position(id));
        self.filter = match (reference, &self.map) {
            (Some(pos), Some(map)) => ViewportFilter::compute(
                pos,
                self.view_radius,
                map.cx(),
                map.cy(),
            ),
            _ => ViewportFilter::empty(),
        };
    }

    // -- Effects ----------------------------------------------------------

    /// Adds a transient effect; the caller schedules its expiry.
    pub fn spawn_effect(&mut self, pos: CellPoint, effect: Spell) -> EffectSeq {
        self.effects.spawn(pos, effect)
    }

    /// Removes a transient effect by sequence. No-op when already gone.
    pub fn expire_effect(&mut self, seq: EffectSeq) -> bool {
        self.effects.expire(seq)
    }

    // -- Session boundary -------------------------------------------------

    /// Drops all projected state. Called when a session starts so stale
    /// objects from a prior connection can't survive into the new one.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.effects.clear();
        self.map = None;
        self.own_id = None;
        self.filter = ViewportFilter::empty();
    }

    // -- Read access ------------------------------------------------------

    pub fn object(&self, id: ObjectId) -> Option<&RemoteObject> {
        self.roster.get(id)
    }

    /// Read-back of an object's displayed position.
    pub fn position(&self, id: ObjectId) -> Option<CellPoint> {
        self.roster.position(id)
    }

    /// Read-back of an object's displayed facing direction.
    pub fn direction(&self, id: ObjectId) -> Option<Dir> {
        self.roster.direction(id)
    }

    pub fn own_id(&self) -> Option<ObjectId> {
        self.own_id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn map(&self) -> Option<&MapGrid> {
        self.map.as_ref()
    }

    pub fn viewport(&self) -> &ViewportFilter {
        &self.filter
    }

    pub fn effects(&self) -> &EffectBoard {
        &self.effects
    }
}

// =========================================================================
// Tests
// =========================================================================

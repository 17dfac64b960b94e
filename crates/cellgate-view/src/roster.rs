//! The roster of currently visible objects.

use std::collections::HashMap;

use cellgate_protocol::{CellPoint, Dir, ObjectId};

use crate::{ObjectPatch, RemoteObject};

/// All objects currently in view, keyed by id.
///
/// At most one entry per id at any time — insertion reuses the existing
/// record. Removal of an unknown id is a tolerated no-op, matching the
/// server's habit of announcing disappearance for objects the client may
/// already have dropped.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    objects: HashMap<ObjectId, RemoteObject>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new object (spawned at `spawn_pos`), or patches the
    /// existing one. `spawn_pos` is only used when the id is new; updates
    /// to an existing object's position travel inside the patch.
    ///
    /// Returns a mutable reference so callers can inspect the result.
    pub fn upsert(
        &mut self,
        id: ObjectId,
        spawn_pos: CellPoint,
        patch: ObjectPatch,
    ) -> &mut RemoteObject {
        let obj = self
            .objects
            .entry(id)
            .or_insert_with(|| RemoteObject::at(id, spawn_pos));
        patch.apply_to(obj);
        obj
    }

    /// Patches an existing object. No-op if the id is unknown.
    pub fn patch(&mut self, id: ObjectId, patch: ObjectPatch) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                patch.apply_to(obj);
                true
            }
            None => false,
        }
    }

    /// Removes an object. Returns `false` (not an error) if absent.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.objects.remove(&id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&RemoteObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut RemoteObject> {
        self.objects.get_mut(&id)
    }

    /// Read-back of an object's displayed position.
    pub fn position(&self, id: ObjectId) -> Option<CellPoint> {
        self.objects.get(&id).map(|o| o.pos)
    }

    /// Read-back of an object's displayed facing direction.
    pub fn direction(&self, id: ObjectId) -> Option<Dir> {
        self.objects.get(&id).map(|o| o.dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drops every object, e.g. when a new session starts.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cellgate_protocol::Phase;

    fn oid(id: u32) -> ObjectId {
        ObjectId(id)
    }

    #[test]
    fn test_upsert_new_object_is_inserted() {
        let mut roster = Roster::new();

        roster.upsert(oid(7), CellPoint::new(2, 2), ObjectPatch::default());

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.position(oid(7)), Some(CellPoint::new(2, 2)));
    }

    #[test]
    fn test_upsert_existing_object_keeps_single_entry() {
        let mut roster = Roster::new();
        roster.upsert(oid(7), CellPoint::new(2, 2), ObjectPatch::default());

        roster.upsert(
            oid(7),
            CellPoint::new(9, 9),
            ObjectPatch::default()
                .pos(CellPoint::new(3, 2))
                .phase(Phase::MovingIn),
        );

        // Invariant: at most one object per id.
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.position(oid(7)), Some(CellPoint::new(3, 2)));
        assert_eq!(roster.get(oid(7)).unwrap().phase, Phase::MovingIn);
    }

    #[test]
    fn test_patch_unknown_id_returns_false() {
        let mut roster = Roster::new();

        let touched =
            roster.patch(oid(9), ObjectPatch::default().phase(Phase::Idle));

        assert!(!touched);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_remove_present_then_absent() {
        let mut roster = Roster::new();
        roster.upsert(oid(7), CellPoint::new(0, 0), ObjectPatch::default());

        assert!(roster.remove(oid(7)));
        // Second removal is a tolerated no-op.
        assert!(!roster.remove(oid(7)));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_position_and_direction_read_back() {
        let mut roster = Roster::new();
        roster.upsert(
            oid(3),
            CellPoint::new(4, 5),
            ObjectPatch::default().dir(Dir::Left),
        );

        assert_eq!(roster.position(oid(3)), Some(CellPoint::new(4, 5)));
        assert_eq!(roster.direction(oid(3)), Some(Dir::Left));
        assert_eq!(roster.position(oid(99)), None);
        assert_eq!(roster.direction(oid(99)), None);
    }

    #[test]
    fn test_clear_empties_roster() {
        let mut roster = Roster::new();
        roster.upsert(oid(1), CellPoint::new(0, 0), ObjectPatch::default());
        roster.upsert(oid(2), CellPoint::new(1, 0), ObjectPatch::default());

        roster.clear();

        assert!(roster.is_empty());
    }
}

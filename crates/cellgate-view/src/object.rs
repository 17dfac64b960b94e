//! The per-object presentation record and its partial-update type.

use cellgate_protocol::{CellPoint, Dir, ObjectId, Phase, Spell};
use serde::{Deserialize, Serialize};

/// The last-known presentation state of one visible object.
///
/// This is the record the movement-step computation reads back from: the
/// stored `pos` and `dir` are the client's source of truth for where an
/// object is displayed right now, because `see_cross_cell` packets carry
/// no coordinates of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteObject {
    pub id: ObjectId,
    pub pos: CellPoint,
    pub dir: Dir,
    pub phase: Phase,
    /// Spell the object is currently casting, if any.
    pub spell: Option<Spell>,
    /// Hit points, where the server has reported them.
    pub hp: Option<i32>,
    /// Display name, where the server has reported one.
    pub name: Option<String>,
}

impl RemoteObject {
    /// Creates an object at a position with everything else defaulted.
    pub fn at(id: ObjectId, pos: CellPoint) -> Self {
        Self {
            id,
            pos,
            dir: Dir::Right,
            phase: Phase::Idle,
            spell: None,
            hp: None,
            name: None,
        }
    }
}

/// A partial update: only fields that are `Some` are applied.
///
/// Mirrors the wire's partial packets — `movement phase` and `direction`
/// in particular are only ever touched when a packet explicitly carries
/// them, never reset as a side effect of some other field arriving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub pos: Option<CellPoint>,
    pub dir: Option<Dir>,
    pub phase: Option<Phase>,
    pub spell: Option<Option<Spell>>,
    pub hp: Option<i32>,
    pub name: Option<String>,
}

impl ObjectPatch {
    pub fn pos(mut self, pos: CellPoint) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn dir(mut self, dir: Dir) -> Self {
        self.dir = Some(dir);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Sets or clears the active spell (outer `Some` means "touch it").
    pub fn spell(mut self, spell: Option<Spell>) -> Self {
        self.spell = Some(spell);
        self
    }

    pub fn hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Applies every present field onto `obj`.
    pub fn apply_to(self, obj: &mut RemoteObject) {
        if let Some(pos) = self.pos {
            obj.pos = pos;
        }
        if let Some(dir) = self.dir {
            obj.dir = dir;
        }
        if let Some(phase) = self.phase {
            obj.phase = phase;
        }
        if let Some(spell) = self.spell {
            obj.spell = spell;
        }
        if let Some(hp) = self.hp {
            obj.hp = Some(hp);
        }
        if let Some(name) = self.name {
            obj.name = Some(name);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_present_fields_only() {
        let mut obj = RemoteObject::at(ObjectId(1), CellPoint::new(2, 2));
        obj.phase = Phase::MovingOut;
        obj.hp = Some(80);

        ObjectPatch::default()
            .pos(CellPoint::new(3, 2))
            .apply_to(&mut obj);

        assert_eq!(obj.pos, CellPoint::new(3, 2));
        // Absent fields untouched.
        assert_eq!(obj.phase, Phase::MovingOut);
        assert_eq!(obj.hp, Some(80));
    }

    #[test]
    fn test_apply_to_can_clear_spell() {
        let mut obj = RemoteObject::at(ObjectId(1), CellPoint::new(0, 0));
        obj.spell = Some(Spell::Lightning);

        ObjectPatch::default().spell(None).apply_to(&mut obj);

        assert_eq!(obj.spell, None);
    }

    #[test]
    fn test_apply_to_empty_patch_is_identity() {
        let mut obj = RemoteObject::at(ObjectId(5), CellPoint::new(1, 1));
        let before = obj.clone();

        ObjectPatch::default().apply_to(&mut obj);

        assert_eq!(obj, before);
    }
}

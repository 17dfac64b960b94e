//! Inbound packets: everything the server pushes at the client.
//!
//! The wire format is a flat JSON object with a mandatory `type` string
//! and type-specific fields, e.g.:
//!
//! ```text
//! {"type":"see_begin_move","id":7,"dir":1}
//! {"type":"map","cx":8,"cells":"W..?....W..."}
//! ```
//!
//! `#[serde(tag = "type")]` models exactly that as a sum type: dispatch
//! becomes an exhaustive `match` instead of a string-keyed handler table,
//! and a tag nobody handles is a decode-time condition.

use serde::{Deserialize, Serialize};

use crate::{Dir, ObjectId, Phase, Spell};

/// A decoded server packet.
///
/// Fields the server may omit (or that only the extended protocol revision
/// sends, like `hp` and `name`) are `Option` with `#[serde(default)]`, so
/// the partial-update semantics of the view layer fall out naturally:
/// absent means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerPacket {
    /// This client's own avatar has been placed into the world.
    /// Movement phase is forced to Idle on apply.
    Init {
        id: ObjectId,
        x: i32,
        y: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hp: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Another object entered visibility. Attributes applied as supplied.
    SeePlayer {
        id: ObjectId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<Dir>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<Phase>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hp: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spell: Option<Spell>,
    },

    /// An object left visibility.
    SeeDisappear { id: ObjectId },

    /// An object started moving: phase → MovingOut, direction applied,
    /// position unchanged until the cell border is crossed.
    SeeBeginMove { id: ObjectId, dir: Dir },

    /// An object crossed a cell border. The packet carries only the id;
    /// the new position is derived from the object's last displayed
    /// position and direction.
    SeeCrossCell { id: ObjectId },

    /// An object finished moving: phase → Idle.
    SeeStop { id: ObjectId },

    /// An object began casting a spell.
    SeeCast { id: ObjectId, spell: Spell },

    /// An object finished casting.
    SeeEndCast { id: ObjectId },

    /// A transient spell effect at a cell. Display-only; removed again
    /// after a short TTL on the client side.
    SeeEffect { x: i32, y: i32, effect: Spell },

    /// This client's own hit points changed. Carries no id — it is always
    /// about the own avatar.
    HpChange { hp: i32 },

    /// The whole map grid, replaced wholesale. `cells` holds one marker
    /// character per cell, row-major, `cx` columns per row.
    Map { cx: usize, cells: String },

    /// Server-initiated session teardown notice. No object mutation.
    Disconnect,
}

impl ServerPacket {
    /// Every wire tag this client understands, in no particular order.
    /// Used by the codec to classify decode failures.
    pub const WIRE_TAGS: [&'static str; 12] = [
        "init",
        "see_player",
        "see_disappear",
        "see_begin_move",
        "see_cross_cell",
        "see_stop",
        "see_cast",
        "see_end_cast",
        "see_effect",
        "hp_change",
        "map",
        "disconnect",
    ];
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! One decode test per wire shape, against literal JSON as the server
    //! emits it. A serde-attribute mistake here means desynchronizing from
    //! every live server.

    use super::*;

    fn decode(raw: &str) -> ServerPacket {
        serde_json::from_str(raw).expect("packet should decode")
    }

    #[test]
    fn test_decode_init_full_fields() {
        let pkt = decode(r#"{"type":"init","id":1,"x":2,"y":3,"hp":100,"name":"ada"}"#);
        assert_eq!(
            pkt,
            ServerPacket::Init {
                id: ObjectId(1),
                x: 2,
                y: 3,
                hp: Some(100),
                name: Some("ada".into()),
            }
        );
    }

    #[test]
    fn test_decode_init_minimal_fields() {
        // The base revision sends only id/x/y.
        let pkt = decode(r#"{"type":"init","id":9,"x":0,"y":0}"#);
        assert_eq!(
            pkt,
            ServerPacket::Init {
                id: ObjectId(9),
                x: 0,
                y: 0,
                hp: None,
                name: None,
            }
        );
    }

    #[test]
    fn test_decode_see_player_with_numeric_dir_and_state() {
        let pkt = decode(
            r#"{"type":"see_player","id":4,"dir":2,"state":1,"x":5,"y":6,"name":"bob"}"#,
        );
        match pkt {
            ServerPacket::SeePlayer {
                id,
                x,
                y,
                dir,
                state,
                name,
                ..
            } => {
                assert_eq!(id, ObjectId(4));
                assert_eq!((x, y), (Some(5), Some(6)));
                assert_eq!(dir, Some(Dir::Left));
                assert_eq!(state, Some(Phase::MovingOut));
                assert_eq!(name.as_deref(), Some("bob"));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_decode_see_player_partial_leaves_fields_none() {
        let pkt = decode(r#"{"type":"see_player","id":4}"#);
        match pkt {
            ServerPacket::SeePlayer { id, x, dir, state, .. } => {
                assert_eq!(id, ObjectId(4));
                assert_eq!(x, None);
                assert_eq!(dir, None);
                assert_eq!(state, None);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_decode_see_begin_move() {
        let pkt = decode(r#"{"type":"see_begin_move","id":7,"dir":1}"#);
        assert_eq!(
            pkt,
            ServerPacket::SeeBeginMove {
                id: ObjectId(7),
                dir: Dir::Up,
            }
        );
    }

    #[test]
    fn test_decode_see_cross_cell_carries_only_id() {
        let pkt = decode(r#"{"type":"see_cross_cell","id":7}"#);
        assert_eq!(pkt, ServerPacket::SeeCrossCell { id: ObjectId(7) });
    }

    #[test]
    fn test_decode_see_stop_and_disappear() {
        assert_eq!(
            decode(r#"{"type":"see_stop","id":3}"#),
            ServerPacket::SeeStop { id: ObjectId(3) }
        );
        assert_eq!(
            decode(r#"{"type":"see_disappear","id":3}"#),
            ServerPacket::SeeDisappear { id: ObjectId(3) }
        );
    }

    #[test]
    fn test_decode_cast_packets() {
        assert_eq!(
            decode(r#"{"type":"see_cast","id":2,"spell":0}"#),
            ServerPacket::SeeCast {
                id: ObjectId(2),
                spell: Spell::Lightning,
            }
        );
        assert_eq!(
            decode(r#"{"type":"see_end_cast","id":2}"#),
            ServerPacket::SeeEndCast { id: ObjectId(2) }
        );
    }

    #[test]
    fn test_decode_see_effect() {
        assert_eq!(
            decode(r#"{"type":"see_effect","x":4,"y":5,"effect":0}"#),
            ServerPacket::SeeEffect {
                x: 4,
                y: 5,
                effect: Spell::Lightning,
            }
        );
    }

    #[test]
    fn test_decode_hp_change() {
        assert_eq!(
            decode(r#"{"type":"hp_change","hp":49}"#),
            ServerPacket::HpChange { hp: 49 }
        );
    }

    #[test]
    fn test_decode_map() {
        assert_eq!(
            decode(r#"{"type":"map","cx":2,"cells":"W..W"}"#),
            ServerPacket::Map {
                cx: 2,
                cells: "W..W".into(),
            }
        );
    }

    #[test]
    fn test_decode_disconnect() {
        assert_eq!(
            decode(r#"{"type":"disconnect"}"#),
            ServerPacket::Disconnect
        );
    }

    #[test]
    fn test_decode_unknown_tag_is_error() {
        let result: Result<ServerPacket, _> =
            serde_json::from_str(r#"{"type":"teleport","id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_invalid_dir_code_is_error() {
        let result: Result<ServerPacket, _> =
            serde_json::from_str(r#"{"type":"see_begin_move","id":7,"dir":9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_tags_cover_every_variant() {
        // Encoding each variant must produce a tag listed in WIRE_TAGS,
        // or the codec's failure classification would misreport it.
        let samples = [
            ServerPacket::Init { id: ObjectId(1), x: 0, y: 0, hp: None, name: None },
            ServerPacket::SeePlayer {
                id: ObjectId(1),
                x: None,
                y: None,
                dir: None,
                state: None,
                hp: None,
                name: None,
                spell: None,
            },
            ServerPacket::SeeDisappear { id: ObjectId(1) },
            ServerPacket::SeeBeginMove { id: ObjectId(1), dir: Dir::Up },
            ServerPacket::SeeCrossCell { id: ObjectId(1) },
            ServerPacket::SeeStop { id: ObjectId(1) },
            ServerPacket::SeeCast { id: ObjectId(1), spell: Spell::Heal },
            ServerPacket::SeeEndCast { id: ObjectId(1) },
            ServerPacket::SeeEffect { x: 0, y: 0, effect: Spell::Heal },
            ServerPacket::HpChange { hp: 1 },
            ServerPacket::Map { cx: 1, cells: ".".into() },
            ServerPacket::Disconnect,
        ];
        for pkt in samples {
            let value = serde_json::to_value(&pkt).unwrap();
            let tag = value["type"].as_str().unwrap();
            assert!(
                ServerPacket::WIRE_TAGS.contains(&tag),
                "tag {tag} missing from WIRE_TAGS"
            );
        }
    }
}

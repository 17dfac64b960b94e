//! Outgoing commands: local intent encoded for the wire.
//!
//! Unlike inbound packets, outgoing traffic is not JSON — the server reads
//! plain whitespace-separated tokens (`move 1`, `cast 0 3 4`, `close`).
//! Nothing here validates symbolic input tokens; that is the dispatch
//! layer's job. A constructed `Command` is always encodable.

use std::fmt;

use crate::{CellPoint, Dir, Spell};

/// A client-to-server command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start moving one cell in the given direction.
    Move(Dir),

    /// Cast a spell. Cell-targeted spells carry their target; self-targeted
    /// spells (heal) carry none.
    Cast {
        spell: Spell,
        target: Option<CellPoint>,
    },

    /// Explicit client-side disconnect notice.
    Close,
}

impl Command {
    /// Encodes the command into its wire form.
    pub fn to_wire(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(dir) => write!(f, "move {}", dir.code()),
            Command::Cast { spell, target } => match target {
                Some(pt) => {
                    write!(f, "cast {} {} {}", spell.code(), pt.x, pt.y)
                }
                None => write!(f, "cast {}", spell.code()),
            },
            Command::Close => f.write_str("close"),
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
    fn test_to_wire_move_encodes_each_direction_code() {
        assert_eq!(Command::Move(Dir::Right).to_wire(), "move 0");
        assert_eq!(Command::Move(Dir::Up).to_wire(), "move 1");
        assert_eq!(Command::Move(Dir::Left).to_wire(), "move 2");
        assert_eq!(Command::Move(Dir::Down).to_wire(), "move 3");
    }

    #[test]
    fn test_to_wire_cast_with_target() {
        let cmd = Command::Cast {
            spell: Spell::Lightning,
            target: Some(CellPoint::new(3, 4)),
        };
        assert_eq!(cmd.to_wire(), "cast 0 3 4");
    }

    #[test]
    fn test_to_wire_cast_self_targeted_omits_target() {
        let cmd = Command::Cast {
            spell: Spell::Heal,
            target: None,
        };
        assert_eq!(cmd.to_wire(), "cast 1");
    }

    #[test]
    fn test_to_wire_close() {
        assert_eq!(Command::Close.to_wire(), "close");
    }
}

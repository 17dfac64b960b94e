//! Wire protocol for Cellgate.
//!
//! This crate defines the language spoken between the game server and this
//! client:
//!
//! - **Vocabulary** ([`Dir`], [`Phase`], [`Spell`], [`ObjectId`],
//!   [`CellPoint`]) — the numeric codes and symbolic tokens both sides
//!   must agree on.
//! - **Packets** ([`ServerPacket`]) — everything the server pushes,
//!   decoded from tagged JSON.
//! - **Commands** ([`Command`]) — local intent, encoded as plain text
//!   (`move 1`, `cast 0 3 4`).
//! - **Codec** ([`Codec`], [`JsonCodec`]) — the decode seam.
//! - **Errors** ([`ProtocolError`]) — malformed vs unknown, kept apart so
//!   the dispatch layer can report them distinctly.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw text frames) and the
//! view projector (object state). It holds no state of its own.
//!
//! ```text
//! Transport (text) → Protocol (ServerPacket) → View (object state)
//! ```

mod codec;
mod command;
mod error;
mod packet;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::Command;
pub use error::ProtocolError;
pub use packet::ServerPacket;
pub use types::{CellPoint, Dir, ObjectId, Phase, Spell};

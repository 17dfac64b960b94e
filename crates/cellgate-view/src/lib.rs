//! View/state projection for Cellgate.
//!
//! This crate maintains the client's local model of everything visible:
//! other players and their movement animation state, the map grid, the
//! viewport visibility filter, and short-lived spell effects. It performs
//! no I/O and knows nothing about transports — the protocol handler feeds
//! it decoded packets and reads presentation state back out.
//!
//! # Key types
//!
//! - [`WorldView`] — the composed projection, sole owner of all state
//! - [`Roster`] / [`RemoteObject`] / [`ObjectPatch`] — visible objects
//! - [`MapGrid`] / [`Cell`] — the walkable/blocked layout
//! - [`ViewportFilter`] — Manhattan-radius cell visibility
//! - [`EffectBoard`] / [`EffectSeq`] — transient spell effects

mod effects;
mod error;
mod map;
mod object;
mod roster;
mod view;
mod visibility;

pub use effects::{ActiveEffect, EffectBoard, EffectSeq};
pub use error::ViewError;
pub use map::{Cell, MapGrid};
pub use object::{ObjectPatch, RemoteObject};
pub use roster::Roster;
pub use view::{WorldView, DEFAULT_VIEW_RADIUS};
pub use visibility::ViewportFilter;

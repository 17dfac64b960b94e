//! # Cellgate
//!
//! Client-side world synchronization for cell-grid multiplayer games.
//!
//! Cellgate keeps a local [`WorldView`] in lockstep with a game server
//! over a WebSocket: it decodes the server's packet stream, runs the
//! per-object movement animation state machine, maintains the map grid
//! and the Manhattan-radius viewport filter, and encodes validated
//! player intents back onto the wire.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cellgate::{GameClient, TracingSink};
//!
//! # async fn run() -> Result<(), cellgate::CellgateError> {
//! let client = GameClient::connect("ws://localhost:8080", TracingSink).await?;
//! client.request_move("up")?;
//! let view = client.snapshot().await?;
//! println!("tracking {} objects", view.roster().len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod handler;
mod session;
mod sink;

pub use client::{ClientConfig, GameClient};
pub use error::CellgateError;
pub use handler::ProtocolHandler;
pub use session::{Session, SessionState};
pub use sink::{DiagLevel, DiagnosticSink, TracingSink};

// Re-export the layer crates so applications need only one dependency.
pub use cellgate_protocol as protocol;
pub use cellgate_transport as transport;
pub use cellgate_view as view;

pub use cellgate_view::WorldView;

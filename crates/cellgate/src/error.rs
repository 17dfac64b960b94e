//! Unified error type for the Cellgate client stack.

use cellgate_protocol::ProtocolError;
use cellgate_transport::TransportError;
use cellgate_view::ViewError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `cellgate` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CellgateError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (decode, invalid code).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A view-level error (malformed map grid).
    #[error(transparent)]
    View(#[from] ViewError),

    /// The client's event loop has already stopped, so the request had
    /// nowhere to go.
    #[error("client event loop stopped")]
    ClientStopped,
}

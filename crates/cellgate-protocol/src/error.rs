//! Error types for the protocol layer.

/// Errors that can occur while decoding packets or validating vocabulary.
///
/// The dispatch layer needs to tell two failure classes apart — a payload
/// that isn't valid JSON at all ("malformed packet") and a well-formed
/// payload whose `type` tag no handler recognizes ("unknown packet type") —
/// so they are distinct variants rather than one decode error.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The raw text isn't valid JSON, or a recognized packet type is
    /// missing required fields.
    #[cfg(feature = "json")]
    #[error("malformed packet: {0}")]
    Malformed(serde_json::Error),

    /// The payload parsed but carries no `type` field, or a `type` this
    /// client has no handler for.
    #[error("unknown packet type: {0:?}")]
    UnknownPacket(Option<String>),

    /// A direction code outside `0..=3` arrived on the wire.
    #[error("invalid direction code: {0}")]
    InvalidDirectionCode(u8),

    /// A movement-phase code outside `0..=2` arrived on the wire.
    #[error("invalid movement phase code: {0}")]
    InvalidPhaseCode(u8),

    /// A spell code outside the fixed vocabulary arrived on the wire.
    #[error("invalid spell code: {0}")]
    InvalidSpellCode(u8),
}

//! Codec seam: turning raw transport text into [`ServerPacket`]s.
//!
//! The wire format is fixed by the server (JSON objects with a `type`
//! tag), but the decode step stays behind a trait so the dispatch layer
//! is written against an interface, not against `serde_json` directly.

use crate::{ProtocolError, ServerPacket};

/// Decodes one raw transport frame into a packet.
pub trait Codec: Send + Sync + 'static {
    /// Decodes raw text into a [`ServerPacket`].
    ///
    /// # Errors
    /// - [`ProtocolError::Malformed`] — the text isn't valid JSON, or a
    ///   recognized packet type is missing required fields.
    /// - [`ProtocolError::UnknownPacket`] — valid JSON whose `type` tag
    ///   (absent, non-string, or unrecognized) has no handler.
    fn decode(&self, raw: &str) -> Result<ServerPacket, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// The JSON codec for the server's textual wire format.
///
/// Decoding runs in two steps so failures land in the right diagnostic
/// bucket: text → `serde_json::Value` (failure: malformed), then value →
/// [`ServerPacket`] (failure on an unlisted tag: unknown packet type;
/// failure on a listed tag: malformed fields).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn decode(&self, raw: &str) -> Result<ServerPacket, ProtocolError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(ProtocolError::Malformed)?;

        match serde_json::from_value::<ServerPacket>(value.clone()) {
            Ok(pkt) => Ok(pkt),
            Err(e) => {
                let tag = value
                    .get("type")
                    .and_then(|t| t.as_str())
                    .map(str::to_owned);
                match &tag {
                    Some(t) if ServerPacket::WIRE_TAGS.contains(&t.as_str()) => {
                        // Recognized type, bad fields.
                        Err(ProtocolError::Malformed(e))
                    }
                    _ => Err(ProtocolError::UnknownPacket(tag)),
                }
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

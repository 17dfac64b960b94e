//! Protocol dispatch: wire messages in, world mutations out.
//!
//! `ProtocolHandler` is the single place where raw server text becomes
//! [`WorldView`] mutations and where player intents become wire
//! commands. The flow per inbound message is:
//!
//!   1. Surface the raw line (`RECV: ...`) on the diagnostic sink
//!   2. Decode through the codec
//!   3. Exhaustive `match` on the packet, one view mutation per arm
//!
//! Decode failures are diagnostics, never errors: a malformed or
//! unknown packet is reported once and dropped, and the next message is
//! processed as if nothing happened.

use cellgate_protocol::{
    CellPoint, Codec, Command, Dir, ObjectId, Phase, ProtocolError,
    ServerPacket, Spell,
};
use cellgate_view::{EffectSeq, ObjectPatch, WorldView};
use tokio::sync::mpsc;

use crate::session::{Session, SessionState};
use crate::sink::DiagnosticSink;

/// Decodes server packets into view mutations and encodes player
/// intents into wire commands.
///
/// Holds at most one live [`Session`]; all outbound traffic goes
/// through it. Generic over the sink and codec so tests can record
/// diagnostics and alternative encodings can be swapped in.
pub struct ProtocolHandler<S: DiagnosticSink, C: Codec> {
    sink: S,
    codec: C,
    view: WorldView,
    session: Option<Session>,
}

impl<S: DiagnosticSink, C: Codec> ProtocolHandler<S, C> {
    pub fn new(sink: S, codec: C, view: WorldView) -> Self {
        Self {
            sink,
            codec,
            view,
            session: None,
        }
    }

    // -- Session lifecycle ------------------------------------------------

    /// Attaches the write half of a freshly opened connection.
    ///
    /// All projected state is reset first so nothing from a prior
    /// session leaks into this one. If a session is somehow still
    /// attached, it is discarded in favor of the new one.
    pub fn open_session(&mut self, outbound: mpsc::UnboundedSender<String>) {
        if self.session.is_some() {
            self.sink.error("replacing still-active session");
        }
        self.view.reset();
        self.session = Some(Session::new(outbound));
        self.sink.info("CONNECTED");
    }

    /// Detaches the session after the transport has gone away.
    /// No-op when there is none.
    pub fn session_closed(&mut self) {
        if self.session.take().is_some() {
            self.sink.error("DISCONNECTED");
        }
    }

    /// Player-initiated teardown: tells the server, then detaches.
    ///
    /// Calling this with no live session is a tolerated no-op — the
    /// player mashing a disconnect button twice is not an error.
    pub fn disconnect(&mut self) {
        if self.session.is_none() {
            self.sink.info("disconnect ignored: not connected");
            return;
        }
        self.send(Command::Close);
        self.session_closed();
    }

    /// Surfaces a transport-level failure and detaches the session.
    pub fn transport_failed(&mut self, reason: &str) {
        self.sink.error(&format!("connection error: {reason}"));
        self.session_closed();
    }

    pub fn session_state(&self) -> SessionState {
        match self.session {
            Some(_) => SessionState::Connected,
            None => SessionState::Disconnected,
        }
    }

    // -- Inbound ----------------------------------------------------------

    /// Processes one raw wire message.
    ///
    /// Returns the sequence of a freshly spawned transient effect, if
    /// any, so the caller can schedule its expiry timer. Messages that
    /// race in after the session is gone are dropped unseen.
    pub fn handle_message(&mut self, raw: &str) -> Option<EffectSeq> {
        if self.session.is_none() {
            return None;
        }
        self.sink.info(&format!("RECV: {raw}"));

        let packet = match self.codec.decode(raw) {
            Ok(packet) => packet,
            Err(ProtocolError::UnknownPacket(tag)) => {
                let tag = tag.as_deref().unwrap_or("<missing>");
                self.sink.error(&format!("unknown packet type: {tag}"));
                return None;
            }
            Err(e) => {
                self.sink.error(&format!("invalid packet: {e}"));
                return None;
            }
        };

        self.apply(packet)
    }

    /// Applies one decoded packet to the view.
    fn apply(&mut self, packet: ServerPacket) -> Option<EffectSeq> {
        match packet {
            ServerPacket::Init { id, x, y, hp, name } => {
                let pos = CellPoint::new(x, y);
                let mut patch =
                    ObjectPatch::default().pos(pos).phase(Phase::Idle);
                if let Some(hp) = hp {
                    patch = patch.hp(hp);
                }
                if let Some(name) = name {
                    patch = patch.name(name);
                }
                self.view.add_or_update(id, pos, patch);
                self.view.mark_own(id);
            }
            ServerPacket::SeePlayer {
                id,
                x,
                y,
                dir,
                state,
                hp,
                name,
                spell,
            } => {
                let spawn =
                    CellPoint::new(x.unwrap_or(0), y.unwrap_or(0));
                let mut patch = ObjectPatch::default();
                if let (Some(x), Some(y)) = (x, y) {
                    patch = patch.pos(CellPoint::new(x, y));
                }
                if let Some(dir) = dir {
                    patch = patch.dir(dir);
                }
                if let Some(state) = state {
                    patch = patch.phase(state);
                }
                if let Some(hp) = hp {
                    patch = patch.hp(hp);
                }
                if let Some(name) = name {
                    patch = patch.name(name);
                }
                if let Some(spell) = spell {
                    patch = patch.spell(Some(spell));
                }
                self.view.add_or_update(id, spawn, patch);
            }
            ServerPacket::SeeDisappear { id } => {
                // Absent id tolerated: disappear may repeat.
                self.view.remove(id);
            }
            ServerPacket::SeeBeginMove { id, dir } => {
                if !self.view.begin_move(id, dir) {
                    self.unknown_object("see_begin_move", id);
                }
            }
            ServerPacket::SeeCrossCell { id } => {
                if self.view.advance(id).is_none() {
                    self.unknown_object("see_cross_cell", id);
                }
            }
            ServerPacket::SeeStop { id } => {
                if !self.view.stop(id) {
                    self.unknown_object("see_stop", id);
                }
            }
            ServerPacket::SeeCast { id, spell } => {
                if !self.view.begin_cast(id, spell) {
                    self.unknown_object("see_cast", id);
                }
            }
            ServerPacket::SeeEndCast { id } => {
                if !self.view.end_cast(id) {
                    self.unknown_object("see_end_cast", id);
                }
            }
            ServerPacket::SeeEffect { x, y, effect } => {
                let seq = self
                    .view
                    .spawn_effect(CellPoint::new(x, y), effect);
                return Some(seq);
            }
            ServerPacket::HpChange { hp } => {
                if !self.view.set_own_hp(hp) {
                    self.sink.error("hp_change before init");
                }
            }
            ServerPacket::Map { cx, cells } => {
                if let Err(e) = self.view.load_map(cx, &cells) {
                    self.sink.error(&format!("rejected map: {e}"));
                }
            }
            ServerPacket::Disconnect => {
                self.sink.info("disconnected by server");
            }
        }
        None
    }

    /// Removes a transient effect when its display timer fires.
    pub fn expire_effect(&mut self, seq: EffectSeq) {
        self.view.expire_effect(seq);
    }

    // -- Outbound ---------------------------------------------------------

    /// Validates and sends a movement request.
    ///
    /// An unrecognized direction token is a diagnostic and nothing goes
    /// out on the wire.
    pub fn request_move(&mut self, dir: &str) {
        match Dir::from_token(dir) {
            Some(dir) => self.send(Command::Move(dir)),
            None => {
                self.sink.error(&format!("invalid direction: {dir}"));
            }
        }
    }

    /// Validates and sends a cast request.
    ///
    /// Self-targeted spells ignore any supplied target; targeted spells
    /// without one are rejected with a diagnostic.
    pub fn request_cast(&mut self, spell: &str, target: Option<(i32, i32)>) {
        let Some(spell) = Spell::from_token(spell) else {
            self.sink.error(&format!("invalid spell: {spell}"));
            return;
        };
        let target = if spell.self_targeted() {
            None
        } else {
            match target {
                Some((x, y)) => Some(CellPoint::new(x, y)),
                None => {
                    self.sink.error(&format!(
                        "spell {spell} requires a target",
                        spell = spell.token()
                    ));
                    return;
                }
            }
        };
        self.send(Command::Cast { spell, target });
    }

    /// Encodes and transmits one command.
    ///
    /// The `SEND:` line is surfaced before the connectivity check, so
    /// the attempt is visible even when it goes nowhere.
    fn send(&mut self, cmd: Command) {
        let wire = cmd.to_wire();
        self.sink.info(&format!("SEND: {wire}"));
        let Some(session) = &self.session else {
            self.sink.error("not connected");
            return;
        };
        if !session.transmit(&wire) {
            // Writer task is gone; the read side will notice shortly,
            // but stop queueing now.
            self.sink.error("not connected");
            self.session_closed();
        }
    }

    fn unknown_object(&self, packet: &str, id: ObjectId) {
        tracing::debug!(%id, packet, "packet for unknown object dropped");
    }

    // -- Read access ------------------------------------------------------

    pub fn view(&self) -> &WorldView {
        &self.view
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use cellgate_protocol::JsonCodec;
    use tokio::sync::mpsc;

    use super::*;
    use crate::sink::DiagLevel;

    /// Records every diagnostic line for assertion.
    #[derive(Clone, Default)]
    struct RecordingSink {
        lines: Arc<Mutex<Vec<(String, DiagLevel)>>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<(String, DiagLevel)> {
            self.lines.lock().unwrap().clone()
        }

        fn errors(&self) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter(|(_, level)| *level == DiagLevel::Error)
                .map(|(text, _)| text)
                .collect()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn log(&self, text: &str, level: DiagLevel) {
            self.lines
                .lock()
                .unwrap()
                .push((text.to_string(), level));
        }
    }

    type TestHandler = ProtocolHandler<RecordingSink, JsonCodec>;

    fn connected_handler() -> (
        TestHandler,
        RecordingSink,
        mpsc::UnboundedReceiver<String>,
    ) {
        let sink = RecordingSink::default();
        let mut handler = ProtocolHandler::new(
            sink.clone(),
            JsonCodec,
            WorldView::default(),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        handler.open_session(tx);
        (handler, sink, rx)
    }

    // =====================================================================
    // Session lifecycle
    // =====================================================================

    #[test]
    fn test_open_session_reports_connected_and_resets_view() {
        let (mut handler, sink, _rx) = connected_handler();
        handler
            .handle_message(r#"{"type":"init","id":1,"x":2,"y":3}"#);
        assert_eq!(handler.view().own_id(), Some(ObjectId(1)));

        // A second connection starts from a clean slate.
        let (tx, _rx2) = mpsc::unbounded_channel();
        handler.open_session(tx);

        assert_eq!(handler.view().own_id(), None);
        assert!(handler.view().roster().is_empty());
        let connected = sink
            .lines()
            .iter()
            .filter(|(text, _)| text == "CONNECTED")
            .count();
        assert_eq!(connected, 2);
    }

    #[test]
    fn test_disconnect_without_session_is_noop() {
        let sink = RecordingSink::default();
        let mut handler = ProtocolHandler::new(
            sink.clone(),
            JsonCodec,
            WorldView::default(),
        );

        handler.disconnect();

        assert_eq!(handler.session_state(), SessionState::Disconnected);
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_disconnect_sends_close_then_detaches() {
        let (mut handler, sink, mut rx) = connected_handler();

        handler.disconnect();

        assert_eq!(rx.try_recv().unwrap(), "close");
        assert_eq!(handler.session_state(), SessionState::Disconnected);
        assert!(sink
            .lines()
            .iter()
            .any(|(text, _)| text == "DISCONNECTED"));
    }

    #[test]
    fn test_messages_after_session_close_are_dropped() {
        let (mut handler, sink, _rx) = connected_handler();
        handler.session_closed();
        let before = sink.lines().len();

        handler
            .handle_message(r#"{"type":"init","id":1,"x":0,"y":0}"#);

        assert_eq!(sink.lines().len(), before);
        assert!(handler.view().roster().is_empty());
    }

    // =====================================================================
    // Outbound validation
    // =====================================================================

    #[test]
    fn test_request_move_all_tokens_encode_codes() {
        let (mut handler, _sink, mut rx) = connected_handler();

        for (token, wire) in [
            ("right", "move 0"),
            ("up", "move 1"),
            ("left", "move 2"),
            ("down", "move 3"),
        ] {
            handler.request_move(token);
            assert_eq!(rx.try_recv().unwrap(), wire);
        }
    }

    #[test]
    fn test_request_move_invalid_token_sends_nothing() {
        let (mut handler, sink, mut rx) = connected_handler();

        handler.request_move("sideways");

        assert!(rx.try_recv().is_err());
        assert_eq!(sink.errors(), vec!["invalid direction: sideways"]);
    }

    #[test]
    fn test_request_cast_targeted_spell_includes_target() {
        let (mut handler, _sink, mut rx) = connected_handler();

        handler.request_cast("lightning", Some((3, 4)));

        assert_eq!(rx.try_recv().unwrap(), "cast 0 3 4");
    }

    #[test]
    fn test_request_cast_self_targeted_drops_target() {
        let (mut handler, _sink, mut rx) = connected_handler();

        handler.request_cast("heal", Some((3, 4)));

        assert_eq!(rx.try_recv().unwrap(), "cast 1");
    }

    #[test]
    fn test_request_cast_lightning_without_target_rejected() {
        let (mut handler, sink, mut rx) = connected_handler();

        handler.request_cast("lightning", None);

        assert!(rx.try_recv().is_err());
        assert_eq!(sink.errors(), vec!["spell lightning requires a target"]);
    }

    #[test]
    fn test_send_without_session_logs_send_then_error() {
        let sink = RecordingSink::default();
        let mut handler = ProtocolHandler::new(
            sink.clone(),
            JsonCodec,
            WorldView::default(),
        );

        handler.request_move("up");

        let lines = sink.lines();
        assert_eq!(lines[0].0, "SEND: move 1");
        assert_eq!(
            lines[1],
            ("not connected".to_string(), DiagLevel::Error)
        );
    }
}

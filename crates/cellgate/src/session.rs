//! Outbound session handle.
//!
//! A [`Session`] is the write side of exactly one live connection. The
//! handler holds at most one; opening a new connection replaces it, and
//! transport shutdown drops it. Commands queue on an unbounded channel
//! drained by the connection's writer task, so encoding never blocks on
//! the socket.

use tokio::sync::mpsc;

/// Whether the handler currently has a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected,
}

/// The write half of a live connection.
#[derive(Debug)]
pub struct Session {
    outbound: mpsc::UnboundedSender<String>,
}

impl Session {
    pub fn new(outbound: mpsc::UnboundedSender<String>) -> Self {
        Self { outbound }
    }

    /// Queues one wire line for transmission.
    ///
    /// Returns `false` if the writer task has already gone away, which
    /// means the connection is effectively dead.
    pub fn transmit(&self, text: &str) -> bool {
        self.outbound.send(text.to_string()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmit_delivers_to_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = Session::new(tx);

        assert!(session.transmit("move 0"));
        assert_eq!(rx.try_recv().unwrap(), "move 0");
    }

    #[test]
    fn test_transmit_reports_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let session = Session::new(tx);

        assert!(!session.transmit("close"));
    }

    #[test]
    fn test_session_state_defaults_to_disconnected() {
        assert_eq!(SessionState::default(), SessionState::Disconnected);
    }
}

//! Diagnostic output channel.
//!
//! The synchronization layer never prints. Everything a player-facing
//! UI might want to surface — wire traffic, rejected inputs, connection
//! transitions — goes through a [`DiagnosticSink`] supplied by the
//! embedding application. A terminal client can print it, a browser
//! shell can append it to a log pane, tests can record it.

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    /// Routine traffic and state transitions.
    Info,
    /// Rejected input, undecodable data, connection failures.
    Error,
}

/// Receives diagnostic lines from the protocol layer.
///
/// Implementations must be cheap: `log` is called inline on the message
/// loop, once per wire message.
pub trait DiagnosticSink: Send + 'static {
    fn log(&self, text: &str, level: DiagLevel);

    fn info(&self, text: &str) {
        self.log(text, DiagLevel::Info);
    }

    fn error(&self, text: &str) {
        self.log(text, DiagLevel::Error);
    }
}

/// Forwards diagnostics to the `tracing` subscriber.
///
/// The default sink when the application has no UI log of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, text: &str, level: DiagLevel) {
        match level {
            DiagLevel::Info => tracing::info!("{text}"),
            DiagLevel::Error => tracing::error!("{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct VecSink(Arc<Mutex<Vec<(String, DiagLevel)>>>);

    impl DiagnosticSink for VecSink {
        fn log(&self, text: &str, level: DiagLevel) {
            self.0
                .lock()
                .unwrap()
                .push((text.to_string(), level));
        }
    }

    #[test]
    fn test_info_and_error_helpers_set_level() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = VecSink(Arc::clone(&lines));

        sink.info("hello");
        sink.error("boom");

        let lines = lines.lock().unwrap();
        assert_eq!(lines[0], ("hello".to_string(), DiagLevel::Info));
        assert_eq!(lines[1], ("boom".to_string(), DiagLevel::Error));
    }
}

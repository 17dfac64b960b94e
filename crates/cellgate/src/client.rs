//! `GameClient` — the connected client event loop.
//!
//! Owns the WebSocket connection and the [`ProtocolHandler`] inside a
//! single Tokio task, so the world view needs no locking: every
//! mutation — inbound frames, player intents, effect expiry timers —
//! funnels through one `select!` loop. Callers talk to the loop through
//! channels and read state via [`GameClient::snapshot`].

use std::sync::Arc;
use std::time::Duration;

use cellgate_protocol::JsonCodec;
use cellgate_transport::{Connection, WebSocketClient, WebSocketConnection};
use cellgate_view::{EffectSeq, WorldView, DEFAULT_VIEW_RADIUS};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::handler::ProtocolHandler;
use crate::sink::DiagnosticSink;
use crate::CellgateError;

/// Tunables for a client connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// How long a transient spell effect stays on the board.
    pub effect_ttl: Duration,
    /// Visibility radius in Manhattan distance.
    pub view_radius: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            effect_ttl: Duration::from_millis(500),
            view_radius: DEFAULT_VIEW_RADIUS,
        }
    }
}

/// A request routed into the event loop.
enum Intent {
    Move(String),
    Cast {
        spell: String,
        target: Option<(i32, i32)>,
    },
    Disconnect,
    Snapshot(oneshot::Sender<WorldView>),
}

/// Handle to a running client event loop.
///
/// Cheap to use from any task; dropping the handle asks the loop to
/// disconnect cleanly.
pub struct GameClient {
    intents: mpsc::UnboundedSender<Intent>,
    task: JoinHandle<()>,
}

impl GameClient {
    /// Connects to a game server with default settings.
    pub async fn connect<S: DiagnosticSink>(
        url: &str,
        sink: S,
    ) -> Result<Self, CellgateError> {
        Self::connect_with(url, sink, ClientConfig::default()).await
    }

    /// Connects with explicit configuration.
    pub async fn connect_with<S: DiagnosticSink>(
        url: &str,
        sink: S,
        config: ClientConfig,
    ) -> Result<Self, CellgateError> {
        let conn = Arc::new(WebSocketClient::connect(url).await?);

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();

        let mut handler = ProtocolHandler::new(
            sink,
            JsonCodec,
            WorldView::new(config.view_radius),
        );
        handler.open_session(out_tx);

        // Writer task: drains queued commands onto the socket. Ends
        // when the handler drops its session, then closes the stream
        // so the server sees a clean shutdown.
        let writer = Arc::clone(&conn);
        tokio::spawn(async move {
            while let Some(text) = out_rx.recv().await {
                if writer.send(&text).await.is_err() {
                    break;
                }
            }
            let _ = writer.close().await;
        });

        let task = tokio::spawn(run_loop(
            conn,
            handler,
            intent_rx,
            config.effect_ttl,
        ));

        Ok(Self {
            intents: intent_tx,
            task,
        })
    }

    /// Queues a movement request (`"right"`, `"up"`, `"left"`,
    /// `"down"`). Token validation happens on the loop.
    pub fn request_move(&self, dir: &str) -> Result<(), CellgateError> {
        self.intent(Intent::Move(dir.to_string()))
    }

    /// Queues a cast request. `target` is ignored for self-targeted
    /// spells and required for the rest.
    pub fn request_cast(
        &self,
        spell: &str,
        target: Option<(i32, i32)>,
    ) -> Result<(), CellgateError> {
        self.intent(Intent::Cast {
            spell: spell.to_string(),
            target,
        })
    }

    /// Asks the loop to tell the server goodbye and stop.
    pub fn disconnect(&self) -> Result<(), CellgateError> {
        self.intent(Intent::Disconnect)
    }

    /// Returns a copy of the world view as the loop currently sees it.
    pub async fn snapshot(&self) -> Result<WorldView, CellgateError> {
        let (tx, rx) = oneshot::channel();
        self.intent(Intent::Snapshot(tx))?;
        rx.await.map_err(|_| CellgateError::ClientStopped)
    }

    /// Whether the event loop is still running.
    pub fn is_running(&self) -> bool {
        !self.intents.is_closed()
    }

    /// Waits for the event loop to finish.
    pub async fn join(self) {
        let _ = self.task.await;
    }

    fn intent(&self, intent: Intent) -> Result<(), CellgateError> {
        self.intents
            .send(intent)
            .map_err(|_| CellgateError::ClientStopped)
    }
}

/// The event loop proper. Exits when the transport closes, errors, or
/// the player disconnects; dropping the handler on exit releases the
/// session, which in turn stops the writer task.
async fn run_loop<S: DiagnosticSink>(
    conn: Arc<WebSocketConnection>,
    mut handler: ProtocolHandler<S, JsonCodec>,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    effect_ttl: Duration,
) {
    let (expiry_tx, mut expiry_rx) = mpsc::unbounded_channel();

    loop {
        tokio::select! {
            frame = conn.recv() => match frame {
                Ok(Some(text)) => {
                    if let Some(seq) = handler.handle_message(&text) {
                        schedule_expiry(&expiry_tx, seq, effect_ttl);
                    }
                }
                Ok(None) => {
                    handler.session_closed();
                    break;
                }
                Err(e) => {
                    handler.transport_failed(&e.to_string());
                    break;
                }
            },
            intent = intents.recv() => match intent {
                Some(Intent::Move(dir)) => handler.request_move(&dir),
                Some(Intent::Cast { spell, target }) => {
                    handler.request_cast(&spell, target);
                }
                Some(Intent::Snapshot(reply)) => {
                    let _ = reply.send(handler.view().clone());
                }
                // Explicit disconnect, or every handle dropped.
                Some(Intent::Disconnect) | None => {
                    handler.disconnect();
                    break;
                }
            },
            Some(seq) = expiry_rx.recv() => handler.expire_effect(seq),
        }
    }
}

/// Fire-once expiry timer for one transient effect. Independent and
/// non-cancellable; a timer that outlives the loop fires into a closed
/// channel and is dropped.
fn schedule_expiry(
    expiry_tx: &mpsc::UnboundedSender<EffectSeq>,
    seq: EffectSeq,
    ttl: Duration,
) {
    let tx = expiry_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        let _ = tx.send(seq);
    });
}

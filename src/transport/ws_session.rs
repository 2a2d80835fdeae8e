use crate::game::constants::TICK_MS;
use crate::game::world::World;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::ticker::TickScheduler;

pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS);

/// Why a broadcast session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    SendFailed,
    PeerClosed,
    Shutdown,
}

pub async fn handle_socket(socket: WebSocket, world: Arc<World>, shutdown: CancellationToken) {
    let session_id = Uuid::new_v4();
    let span = tracing::info_span!("session", %session_id);
    let (sender, receiver) = socket.split();

    async move {
        tracing::info!("broadcast session started");
        let end = run_session(&world, sender, receiver, TICK_PERIOD, shutdown).await;
        tracing::info!(?end, "broadcast session ended");
    }
    .instrument(span)
    .await;
}

/// Pushes one snapshot per tick until a send fails, the peer goes away or
/// `shutdown` is cancelled. Inbound frames other than Close are ignored.
/// The scheduler is dropped with this future on every exit path.
pub async fn run_session<S, R, E>(
    world: &World,
    mut sender: S,
    mut receiver: R,
    period: Duration,
    shutdown: CancellationToken,
) -> SessionEnd
where
    S: Sink<Message> + Unpin,
    S::Error: Into<anyhow::Error>,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut ticker = TickScheduler::new(period);
    tracing::debug!(period = ?ticker.period(), "tick scheduler armed");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return SessionEnd::Shutdown,
            _ = ticker.tick() => {
                let sender = &mut sender;
                let result = world
                    .advance_and_publish(move |payload| async move {
                        sender
                            .send(Message::Text(payload))
                            .await
                            .map_err(Into::<anyhow::Error>::into)
                    })
                    .await;
                if let Err(error) = result {
                    tracing::debug!(?error, "snapshot send failed");
                    return SessionEnd::SendFailed;
                }
            }
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => return SessionEnd::PeerClosed,
                Some(Err(error)) => {
                    tracing::debug!(%error, "inbound stream failed");
                    return SessionEnd::PeerClosed;
                }
                Some(Ok(_)) => {}
            },
        }
    }
}

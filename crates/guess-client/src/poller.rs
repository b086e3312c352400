use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use guess_common::lobby::Lobby;

use crate::api::LobbyApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

/// Periodically fetches the lobby for one player and forwards each snapshot.
///
/// Polling starts with an immediate fetch and runs until `stop` is called or
/// the poller is dropped. A fetch is always awaited before the next tick is
/// taken, and ticks missed meanwhile are skipped, so at most one request is
/// outstanding.
#[derive(Debug, Default)]
pub struct LobbyPoller {
    handle: Option<JoinHandle<()>>,
}

impl LobbyPoller {
    pub fn start<A, E>(
        api: Arc<A>,
        player_id: String,
        interval: Duration,
        tx: mpsc::Sender<E>,
    ) -> Self
    where
        A: LobbyApi + 'static,
        E: From<Lobby> + Send + 'static,
    {
        let handle = tokio::spawn(poll_loop(api, player_id, interval, tx));
        Self {
            handle: Some(handle),
        }
    }

    pub fn state(&self) -> PollerState {
        match &self.handle {
            Some(handle) if !handle.is_finished() => PollerState::Polling,
            _ => PollerState::Idle,
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Lobby poller stopped");
        }
    }
}

impl Drop for LobbyPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<A, E>(api: Arc<A>, player_id: String, interval: Duration, tx: mpsc::Sender<E>)
where
    A: LobbyApi,
    E: From<Lobby>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::debug!("Polling lobby for player {} every {:?}", player_id, interval);

    loop {
        ticker.tick().await;

        match api.fetch_lobby(&player_id).await {
            Ok(lobby) => {
                tracing::debug!("Lobby {} has {} player(s)", lobby.id, lobby.players.len());
                if tx.send(E::from(lobby)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Lobby poll for {} failed: {}", player_id, e);
            }
        }
    }
}

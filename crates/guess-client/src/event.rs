use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use guess_common::lobby::{Lobby, LobbyId};
use guess_common::setup::SetupState;

use crate::ready::ReadyOutcome;

/// A lobby the backend placed us in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLobby {
    pub lobby_id: LobbyId,
    pub player_id: String,
    /// Setup as it was when the request went out.
    pub setup: SetupState,
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Lobby(Lobby),
    LobbyCreated(Result<CreatedLobby, String>),
    /// Reply to a ready post sent from waiting room `session`.
    Ready { session: u64, outcome: ReadyOutcome },
    Tick,
}

impl From<Lobby> for AppEvent {
    fn from(lobby: Lobby) -> Self {
        AppEvent::Lobby(lobby)
    }
}

pub async fn event_loop(event_tx: mpsc::Sender<AppEvent>) {
    let mut key_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    loop {
        let event = tokio::select! {
            Some(Ok(Event::Key(key))) = key_stream.next() => {
                AppEvent::Key(key)
            }
            _ = tick_interval.tick() => {
                AppEvent::Tick
            }
        };

        if event_tx.send(event).await.is_err() {
            break;
        }
    }
}

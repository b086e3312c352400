use std::fmt;

use serde::{Deserialize, Serialize};

pub const EMPTY_LOBBY_PLACEHOLDER: &str = "Lobby empty or data not loaded.";

/// Server-assigned lobby identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LobbyId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyIdError {
    #[error("lobby id must not be empty")]
    Empty,
}

impl LobbyId {
    pub fn new(id: impl Into<String>) -> Result<Self, LobbyIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(LobbyIdError::Empty);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LobbyId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LobbyId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only snapshot of a lobby as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lobby {
    pub id: LobbyId,
    pub players: Vec<Player>,
}

impl Lobby {
    pub fn new(id: LobbyId, players: Vec<Player>) -> Self {
        Self { id, players }
    }

    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    pub fn roster_text(&self) -> String {
        self.player_names().collect::<Vec<_>>().join("\n")
    }
}

/// Holds the latest lobby snapshot. Each accepted snapshot replaces the
/// previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyView {
    current: Option<Lobby>,
}

impl LobbyView {
    pub fn current(&self) -> Option<&Lobby> {
        self.current.as_ref()
    }

    /// Returns `false` when `lobby` equals the held snapshot.
    pub fn apply(&mut self, lobby: Lobby) -> bool {
        if self.current.as_ref() == Some(&lobby) {
            return false;
        }
        self.current = Some(lobby);
        true
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn summary_lines(&self) -> Vec<String> {
        summary_lines(self.current())
    }
}

/// Lines shown in the waiting room for the current snapshot, or the
/// placeholder when nothing has loaded yet.
pub fn summary_lines(lobby: Option<&Lobby>) -> Vec<String> {
    match lobby {
        Some(lobby) => {
            let mut lines = vec![format!("Lobby ID: {}", lobby.id), "Players:".to_string()];
            lines.extend(lobby.player_names().map(str::to_string));
            lines
        }
        None => vec![EMPTY_LOBBY_PLACEHOLDER.to_string()],
    }
}

//! Scripted in-memory backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use guess_common::lobby::{Lobby, LobbyId, Player};
use guess_common::protocol::{
    CreateLobbyRequest, CreateLobbyResponse, MalformedResponse, ReadyStatusRequest,
    ReadyStatusResponse,
};

use crate::api::{ApiError, LobbyApi};

pub fn lobby(id: &str, names: &[&str]) -> Lobby {
    Lobby::new(
        LobbyId::new(id).unwrap(),
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Player::new(format!("p{}", i + 1), *n))
            .collect(),
    )
}

pub enum Scripted<T> {
    Ok(T),
    Malformed,
}

impl<T> Scripted<T> {
    fn into_result(self) -> Result<T, ApiError> {
        match self {
            Scripted::Ok(v) => Ok(v),
            Scripted::Malformed => Err(ApiError::Malformed(MalformedResponse::UnrecognizedShape)),
        }
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub lobbies: Mutex<VecDeque<Scripted<Lobby>>>,
    pub ready: Mutex<VecDeque<Scripted<ReadyStatusResponse>>>,
    pub created: Mutex<Option<CreateLobbyResponse>>,
    pub ready_requests: Mutex<Vec<ReadyStatusRequest>>,
    pub fetch_delay: Duration,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn with_lobbies(lobbies: Vec<Scripted<Lobby>>) -> Self {
        Self {
            lobbies: Mutex::new(lobbies.into()),
            ..Self::default()
        }
    }

    pub fn with_ready(responses: Vec<Scripted<ReadyStatusResponse>>) -> Self {
        Self {
            ready: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LobbyApi for FakeApi {
    async fn fetch_lobby(&self, player_id: &str) -> Result<Lobby, ApiError> {
        if player_id.is_empty() {
            return Err(ApiError::MissingPlayerId);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let next = self.lobbies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Scripted::Ok(lobby("L1", &["Alice"])))
            .into_result()
    }

    async fn create_lobby(
        &self,
        _request: &CreateLobbyRequest,
    ) -> Result<CreateLobbyResponse, ApiError> {
        self.created
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Malformed(MalformedResponse::MissingField("lobbyId")))
    }

    async fn update_ready_status(
        &self,
        request: &ReadyStatusRequest,
    ) -> Result<ReadyStatusResponse, ApiError> {
        self.ready_requests.lock().unwrap().push(request.clone());
        let next = self.ready.lock().unwrap().pop_front();
        next.unwrap_or(Scripted::Malformed).into_result()
    }
}

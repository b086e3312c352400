use std::future::Future;

use guess_common::lobby::Lobby;
use guess_common::protocol::{
    self, CreateLobbyRequest, CreateLobbyResponse, MalformedResponse, ReadyStatusRequest,
    ReadyStatusResponse, CREATE_LOBBY_PATH, GET_LOBBIES_PATH, UPDATE_READY_STATUS_PATH,
};

use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("player id is required")]
    MissingPlayerId,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponse),
}

/// The three backend calls the client makes.
pub trait LobbyApi: Send + Sync {
    fn fetch_lobby(
        &self,
        player_id: &str,
    ) -> impl Future<Output = Result<Lobby, ApiError>> + Send;

    fn create_lobby(
        &self,
        request: &CreateLobbyRequest,
    ) -> impl Future<Output = Result<CreateLobbyResponse, ApiError>> + Send;

    fn update_ready_status(
        &self,
        request: &ReadyStatusRequest,
    ) -> impl Future<Output = Result<ReadyStatusResponse, ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpLobbyApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpLobbyApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

impl LobbyApi for HttpLobbyApi {
    async fn fetch_lobby(&self, player_id: &str) -> Result<Lobby, ApiError> {
        if player_id.is_empty() {
            return Err(ApiError::MissingPlayerId);
        }

        let body = self
            .client
            .get(self.config.endpoint(GET_LOBBIES_PATH))
            .query(&[("playerId", player_id)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let (lobby, shape) = protocol::normalize_lobby_response(&body)?;
        tracing::debug!(
            "Lobby {} normalized from {:?} shape ({} players)",
            lobby.id,
            shape,
            lobby.players.len()
        );
        Ok(lobby)
    }

    async fn create_lobby(
        &self,
        request: &CreateLobbyRequest,
    ) -> Result<CreateLobbyResponse, ApiError> {
        let body = self
            .client
            .post(self.config.endpoint(CREATE_LOBBY_PATH))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(protocol::decode_response(&body)?)
    }

    async fn update_ready_status(
        &self,
        request: &ReadyStatusRequest,
    ) -> Result<ReadyStatusResponse, ApiError> {
        // Rejections may come back with a 4xx and a status body; keep the body.
        let body = self
            .client
            .post(self.config.endpoint(UPDATE_READY_STATUS_PATH))
            .json(request)
            .send()
            .await?
            .bytes()
            .await?;
        Ok(protocol::decode_response(&body)?)
    }
}

use guess_common::lobby::LobbyId;
use guess_common::phase::ScreenPhase;
use guess_common::protocol::ReadyStatusRequest;

use crate::api::LobbyApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyOutcome {
    Acknowledged,
    Rejected {
        status: String,
        message: Option<String>,
    },
    Failed(String),
}

impl ReadyOutcome {
    /// Only an acknowledgement moves the phase; anything else keeps it.
    pub fn apply(&self, phase: ScreenPhase) -> ScreenPhase {
        match self {
            ReadyOutcome::Acknowledged => phase.on_ready_acknowledged(),
            _ => phase,
        }
    }
}

/// Posts the ready flag. Failures are logged here and never retried.
pub async fn submit_ready<A: LobbyApi>(api: &A, lobby_id: LobbyId, player_id: String) -> ReadyOutcome {
    let request = ReadyStatusRequest {
        lobby_id,
        player_id,
        ready: true,
    };

    match api.update_ready_status(&request).await {
        Ok(resp) if resp.is_success() => {
            tracing::info!("Ready status acknowledged for lobby {}", request.lobby_id);
            ReadyOutcome::Acknowledged
        }
        Ok(resp) => {
            tracing::warn!(
                "Ready status rejected for lobby {}: {} ({})",
                request.lobby_id,
                resp.status,
                resp.message.as_deref().unwrap_or("no message")
            );
            ReadyOutcome::Rejected {
                status: resp.status,
                message: resp.message,
            }
        }
        Err(e) => {
            tracing::warn!("Ready status update for lobby {} failed: {}", request.lobby_id, e);
            ReadyOutcome::Failed(e.to_string())
        }
    }
}

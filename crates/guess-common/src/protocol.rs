use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lobby::{Lobby, LobbyId, Player};
use crate::setup::{Category, CustomGameOption, GameType, SearchOption};

pub const GET_LOBBIES_PATH: &str = "get-lobbies";
pub const CREATE_LOBBY_PATH: &str = "create-lobby";
pub const UPDATE_READY_STATUS_PATH: &str = "update-ready-status";

pub const STATUS_SUCCESS: &str = "success";

// -- Client -> Server bodies --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyRequest {
    pub player_name: String,
    pub selected_type: GameType,
    pub selected_category: Category,
    pub selected_search_option: SearchOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_custom_game_option: Option<CustomGameOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyStatusRequest {
    pub lobby_id: LobbyId,
    pub player_id: String,
    pub ready: bool,
}

// -- Server -> Client bodies --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyResponse {
    pub lobby_id: LobbyId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub players: Option<Value>,
}

impl CreateLobbyResponse {
    /// Identifier to poll with after joining.
    ///
    /// The backend echoes the lobby roster, either as a plain array or nested
    /// under a lobby object's `players`. The newest entry carrying our name is
    /// ours. Without a match the lobby id is used instead.
    pub fn player_id_for(&self, player_name: &str) -> String {
        let roster = match &self.players {
            Some(Value::Array(items)) => Some(items),
            Some(Value::Object(map)) => map.get("players").and_then(Value::as_array),
            _ => None,
        };

        roster
            .into_iter()
            .flatten()
            .rev()
            .filter_map(|entry| serde_json::from_value::<Player>(entry.clone()).ok())
            .find(|p| p.name == player_name && !p.id.is_empty())
            .map(|p| p.id)
            .unwrap_or_else(|| self.lobby_id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyStatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ReadyStatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

// -- Normalization --

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("body is not valid JSON: {0}")]
    NotJson(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("lobby id is missing, empty or not a string")]
    InvalidLobbyId,
    #[error("`players` is not an array")]
    PlayersNotArray,
    #[error("player entry {0} is not recognized")]
    InvalidPlayer(usize),
    #[error("expected a [lobbyId, players] pair, got {0} elements")]
    UnexpectedArrayLength(usize),
    #[error("unrecognized response shape")]
    UnrecognizedShape,
    #[error("unexpected body: {0}")]
    Decode(String),
}

/// Which accepted layout a lobby response used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "lobbyId": ..., "players": [{ "id", "name" }, ...] }`
    Object,
    /// `[lobbyId, players]`
    Pair,
}

pub fn normalize_lobby_response(body: &[u8]) -> Result<(Lobby, ResponseShape), MalformedResponse> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| MalformedResponse::NotJson(e.to_string()))?;
    normalize_lobby_value(&value)
}

pub fn normalize_lobby_value(value: &Value) -> Result<(Lobby, ResponseShape), MalformedResponse> {
    match value {
        Value::Object(map) => {
            let id = map
                .get("lobbyId")
                .ok_or(MalformedResponse::MissingField("lobbyId"))?;
            let players = map
                .get("players")
                .ok_or(MalformedResponse::MissingField("players"))?;
            let lobby = build_lobby(id, players, false)?;
            Ok((lobby, ResponseShape::Object))
        }
        Value::Array(items) => match items.as_slice() {
            [id, players] => {
                let lobby = build_lobby(id, players, true)?;
                Ok((lobby, ResponseShape::Pair))
            }
            _ => Err(MalformedResponse::UnexpectedArrayLength(items.len())),
        },
        _ => Err(MalformedResponse::UnrecognizedShape),
    }
}

fn build_lobby(id: &Value, players: &Value, allow_bare_names: bool) -> Result<Lobby, MalformedResponse> {
    let id = id
        .as_str()
        .and_then(|s| LobbyId::new(s).ok())
        .ok_or(MalformedResponse::InvalidLobbyId)?;

    let entries = players.as_array().ok_or(MalformedResponse::PlayersNotArray)?;
    let players = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| parse_player(idx, entry, allow_bare_names))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Lobby::new(id, players))
}

fn parse_player(idx: usize, entry: &Value, allow_bare_names: bool) -> Result<Player, MalformedResponse> {
    match entry {
        // The pair form lists names only; the name doubles as the id.
        Value::String(name) if allow_bare_names => Ok(Player::new(name.clone(), name.clone())),
        Value::Object(map) => {
            let id = map.get("id").and_then(Value::as_str);
            let name = map.get("name").and_then(Value::as_str);
            match (id, name) {
                (Some(id), Some(name)) => Ok(Player::new(id, name)),
                _ => Err(MalformedResponse::InvalidPlayer(idx)),
            }
        }
        _ => Err(MalformedResponse::InvalidPlayer(idx)),
    }
}

// -- Serialization helpers --

pub fn decode_response<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, MalformedResponse> {
    serde_json::from_slice(body).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            MalformedResponse::NotJson(e.to_string())
        } else {
            MalformedResponse::Decode(e.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(json: &str) -> Result<(Lobby, ResponseShape), MalformedResponse> {
        normalize_lobby_response(json.as_bytes())
    }

    #[test]
    fn test_object_shape() {
        let (lobby, shape) =
            normalize(r#"{"lobbyId":"L1","players":[{"id":"p1","name":"Alice"}]}"#).unwrap();
        assert_eq!(shape, ResponseShape::Object);
        assert_eq!(lobby.id.as_str(), "L1");
        assert_eq!(lobby.players, vec![Player::new("p1", "Alice")]);
    }

    #[test]
    fn test_object_shape_ignores_extra_fields() {
        let (lobby, _) = normalize(
            r#"{"lobbyId":"L1","status":"joined","players":[{"id":"p1","name":"Alice","score":3}]}"#,
        )
        .unwrap();
        assert_eq!(lobby.players.len(), 1);
    }

    #[test]
    fn test_pair_shape_with_names() {
        let (lobby, shape) = normalize(r#"["L2", ["Alice", "Bob"]]"#).unwrap();
        assert_eq!(shape, ResponseShape::Pair);
        assert_eq!(lobby.id.as_str(), "L2");
        assert_eq!(lobby.roster_text(), "Alice\nBob");
        assert_eq!(lobby.players[0].id, "Alice");
    }

    #[test]
    fn test_pair_shape_with_player_objects() {
        let (lobby, _) = normalize(r#"["L2", [{"id":"p9","name":"Zed"}]]"#).unwrap();
        assert_eq!(lobby.players, vec![Player::new("p9", "Zed")]);
    }

    #[test]
    fn test_empty_object_rejected() {
        assert_eq!(normalize("{}"), Err(MalformedResponse::MissingField("lobbyId")));
    }

    #[test]
    fn test_missing_players_rejected() {
        assert_eq!(
            normalize(r#"{"lobbyId":"L1"}"#),
            Err(MalformedResponse::MissingField("players"))
        );
    }

    #[test]
    fn test_non_array_players_rejected() {
        assert_eq!(
            normalize(r#"{"lobbyId":"L1","players":"Alice"}"#),
            Err(MalformedResponse::PlayersNotArray)
        );
        assert_eq!(
            normalize(r#"{"lobbyId":"L1","players":{"id":"p1"}}"#),
            Err(MalformedResponse::PlayersNotArray)
        );
    }

    #[test]
    fn test_invalid_lobby_id_rejected() {
        assert_eq!(
            normalize(r#"{"lobbyId":"","players":[]}"#),
            Err(MalformedResponse::InvalidLobbyId)
        );
        assert_eq!(
            normalize(r#"{"lobbyId":42,"players":[]}"#),
            Err(MalformedResponse::InvalidLobbyId)
        );
    }

    #[test]
    fn test_bare_names_only_in_pair_shape() {
        assert_eq!(
            normalize(r#"{"lobbyId":"L1","players":["Alice"]}"#),
            Err(MalformedResponse::InvalidPlayer(0))
        );
    }

    #[test]
    fn test_player_missing_name_rejected() {
        assert_eq!(
            normalize(r#"{"lobbyId":"L1","players":[{"id":"p1","name":"A"},{"id":"p2"}]}"#),
            Err(MalformedResponse::InvalidPlayer(1))
        );
    }

    #[test]
    fn test_wrong_array_length_rejected() {
        assert_eq!(
            normalize(r#"["L1"]"#),
            Err(MalformedResponse::UnexpectedArrayLength(1))
        );
    }

    #[test]
    fn test_scalar_and_garbage_rejected() {
        assert_eq!(normalize("42"), Err(MalformedResponse::UnrecognizedShape));
        assert!(matches!(normalize("<html>"), Err(MalformedResponse::NotJson(_))));
    }

    #[test]
    fn test_create_request_wire_format() {
        let req = CreateLobbyRequest {
            player_name: "Alice".into(),
            selected_type: GameType::Lyrics,
            selected_category: Category::Pop,
            selected_search_option: SearchOption::FindGame,
            selected_custom_game_option: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["playerName"], "Alice");
        assert_eq!(json["selectedType"], GameType::Lyrics.wire_value());
        assert_eq!(json["selectedCategory"], Category::Pop.wire_value());
        assert_eq!(json["selectedSearchOption"], SearchOption::FindGame.wire_value());
        assert!(json.get("selectedCustomGameOption").is_none());
    }

    #[test]
    fn test_ready_request_wire_format() {
        let req = ReadyStatusRequest {
            lobby_id: LobbyId::new("L1").unwrap(),
            player_id: "p1".into(),
            ready: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"lobbyId": "L1", "playerId": "p1", "ready": true}));
    }

    #[test]
    fn test_ready_response_success() {
        let ok: ReadyStatusResponse = decode_response(br#"{"status":"success"}"#).unwrap();
        assert!(ok.is_success());
        let err: ReadyStatusResponse =
            decode_response(br#"{"status":"error","message":"no such lobby"}"#).unwrap();
        assert!(!err.is_success());
        assert_eq!(err.message.as_deref(), Some("no such lobby"));
    }

    #[test]
    fn test_create_response_player_id_from_roster() {
        let resp: CreateLobbyResponse = decode_response(
            br#"{"lobbyId":"L1","status":"joined","players":[{"id":"a","name":"Bob"},{"id":"b","name":"Alice"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.player_id_for("Alice"), "b");
    }

    #[test]
    fn test_create_response_player_id_from_nested_lobby() {
        let resp: CreateLobbyResponse = decode_response(
            br#"{"lobbyId":"L1","players":{"id":"L1","players":[{"id":"x","name":"Alice"}]}}"#,
        )
        .unwrap();
        assert_eq!(resp.player_id_for("Alice"), "x");
    }

    #[test]
    fn test_create_response_player_id_falls_back_to_lobby() {
        let resp: CreateLobbyResponse = decode_response(br#"{"lobbyId":"L7"}"#).unwrap();
        assert_eq!(resp.player_id_for("Alice"), "L7");
    }

    #[test]
    fn test_create_response_requires_lobby_id() {
        let err = decode_response::<CreateLobbyResponse>(br#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, MalformedResponse::Decode(_)));
    }
}

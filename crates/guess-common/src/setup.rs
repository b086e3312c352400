use serde::{Deserialize, Serialize};

use crate::protocol::CreateLobbyRequest;

pub const DEFAULT_PLAYER_NAME: &str = "Player Name";
pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 25;

// -- Option groups --
//
// Wire values are what the backend stores and matches lobbies on.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[serde(rename = "Şarkıcı İsmi")]
    SingerName,
    #[serde(rename = "Müzik Sözü")]
    Lyrics,
    #[serde(rename = "Şarkıcı Adı")]
    ArtistName,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::SingerName, GameType::Lyrics, GameType::ArtistName];

    pub fn label(&self) -> &'static str {
        match self {
            GameType::SingerName => "Singer Name",
            GameType::Lyrics => "Lyrics",
            GameType::ArtistName => "Artist Name",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            GameType::SingerName => "Şarkıcı İsmi",
            GameType::Lyrics => "Müzik Sözü",
            GameType::ArtistName => "Şarkıcı Adı",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Pop")]
    Pop,
    #[serde(rename = "80'ler Müzikleri")]
    Eighties,
    #[serde(rename = "Eurovision")]
    Eurovision,
    #[serde(rename = "Arabesk Şarkılar")]
    Arabesque,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pop,
        Category::Eighties,
        Category::Eurovision,
        Category::Arabesque,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Pop => "Pop",
            Category::Eighties => "80s Hits",
            Category::Eurovision => "Eurovision",
            Category::Arabesque => "Arabesque",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            Category::Pop => "Pop",
            Category::Eighties => "80'ler Müzikleri",
            Category::Eurovision => "Eurovision",
            Category::Arabesque => "Arabesk Şarkılar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchOption {
    #[serde(rename = "Oyun Bul")]
    FindGame,
    #[serde(rename = "Rastgele Ara")]
    RandomSearch,
    #[serde(rename = "Özel Oyun")]
    CustomGame,
}

impl SearchOption {
    pub const ALL: [SearchOption; 3] = [
        SearchOption::FindGame,
        SearchOption::RandomSearch,
        SearchOption::CustomGame,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SearchOption::FindGame => "Find Game",
            SearchOption::RandomSearch => "Random Search",
            SearchOption::CustomGame => "Custom Game",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            SearchOption::FindGame => "Oyun Bul",
            SearchOption::RandomSearch => "Rastgele Ara",
            SearchOption::CustomGame => "Özel Oyun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomGameOption {
    #[serde(rename = "Katıl")]
    Join,
}

impl CustomGameOption {
    pub fn label(&self) -> &'static str {
        match self {
            CustomGameOption::Join => "Join Custom Game",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("name must be between 3 and 25 characters (got {len})")]
    InvalidName { len: usize },
    #[error("game type, category and search option must all be selected")]
    MissingSelection,
}

pub fn validate_name(name: &str) -> Result<(), SetupError> {
    let len = name.chars().count();
    if (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        Ok(())
    } else {
        Err(SetupError::InvalidName { len })
    }
}

/// Immutable snapshot of the setup screen. Every transition returns a new
/// value and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupState {
    player_name: String,
    name_draft: Option<String>,
    game_type: Option<GameType>,
    category: Option<Category>,
    search: Option<SearchOption>,
    custom: Option<CustomGameOption>,
}

impl Default for SetupState {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

impl SetupState {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            name_draft: None,
            game_type: None,
            category: None,
            search: None,
            custom: None,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn is_editing(&self) -> bool {
        self.name_draft.is_some()
    }

    /// Text shown in the name field: the draft while editing, else the saved name.
    pub fn displayed_name(&self) -> &str {
        self.name_draft.as_deref().unwrap_or(&self.player_name)
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.game_type
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn search(&self) -> Option<SearchOption> {
        self.search
    }

    pub fn custom(&self) -> Option<CustomGameOption> {
        self.custom
    }

    pub fn can_find_game(&self) -> bool {
        self.search == Some(SearchOption::FindGame)
    }

    pub fn with_game_type(&self, game_type: GameType) -> Self {
        Self {
            game_type: Some(game_type),
            ..self.clone()
        }
    }

    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category: Some(category),
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: SearchOption) -> Self {
        Self {
            search: Some(search),
            custom: None,
            ..self.clone()
        }
    }

    pub fn with_custom(&self, custom: CustomGameOption) -> Self {
        Self {
            custom: Some(custom),
            ..self.clone()
        }
    }

    pub fn begin_edit(&self) -> Self {
        Self {
            name_draft: Some(self.player_name.clone()),
            ..self.clone()
        }
    }

    pub fn with_draft(&self, draft: impl Into<String>) -> Self {
        if !self.is_editing() {
            return self.clone();
        }
        Self {
            name_draft: Some(draft.into()),
            ..self.clone()
        }
    }

    pub fn push_char(&self, c: char) -> Self {
        let mut draft = self.displayed_name().to_string();
        draft.push(c);
        self.with_draft(draft)
    }

    pub fn pop_char(&self) -> Self {
        let mut draft = self.displayed_name().to_string();
        draft.pop();
        self.with_draft(draft)
    }

    /// Commits the draft. On an invalid name nothing changes and the caller
    /// keeps the current snapshot, still in edit mode.
    pub fn save_name(&self) -> Result<Self, SetupError> {
        let Some(draft) = &self.name_draft else {
            return Ok(self.clone());
        };
        validate_name(draft)?;
        Ok(Self {
            player_name: draft.clone(),
            name_draft: None,
            ..self.clone()
        })
    }

    pub fn reset_selections(&self) -> Self {
        Self::new(self.player_name.clone())
    }

    pub fn create_request(&self) -> Result<CreateLobbyRequest, SetupError> {
        match (self.game_type, self.category, self.search) {
            (Some(selected_type), Some(selected_category), Some(selected_search_option)) => {
                Ok(CreateLobbyRequest {
                    player_name: self.player_name.trim().to_string(),
                    selected_type,
                    selected_category,
                    selected_search_option,
                    selected_custom_game_option: self.custom,
                })
            }
            _ => Err(SetupError::MissingSelection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("abc").is_ok());
        assert!(validate_name(&"a".repeat(25)).is_ok());
        assert_eq!(validate_name(""), Err(SetupError::InvalidName { len: 0 }));
        assert_eq!(validate_name("ab"), Err(SetupError::InvalidName { len: 2 }));
        assert_eq!(
            validate_name(&"a".repeat(26)),
            Err(SetupError::InvalidName { len: 26 })
        );
    }

    #[test]
    fn test_validate_name_counts_chars() {
        // 3 chars, 6 bytes
        assert!(validate_name("çöş").is_ok());
    }

    #[test]
    fn test_save_valid_name() {
        let state = SetupState::default().begin_edit().with_draft("Alice");
        assert!(state.is_editing());
        let saved = state.save_name().unwrap();
        assert_eq!(saved.player_name(), "Alice");
        assert!(!saved.is_editing());
    }

    #[test]
    fn test_save_invalid_name_leaves_state() {
        let state = SetupState::default().begin_edit().with_draft("Al");
        let before = state.clone();
        assert_eq!(state.save_name(), Err(SetupError::InvalidName { len: 2 }));
        assert_eq!(state, before);
        assert!(state.is_editing());
        assert_eq!(state.player_name(), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_typing_edits_draft_only() {
        let state = SetupState::new("Bob").begin_edit().push_char('!').pop_char().pop_char();
        assert_eq!(state.displayed_name(), "Bo");
        assert_eq!(state.player_name(), "Bob");
    }

    #[test]
    fn test_typing_ignored_when_not_editing() {
        let state = SetupState::new("Bob").push_char('x');
        assert_eq!(state.displayed_name(), "Bob");
    }

    #[test]
    fn test_last_selection_wins() {
        let state = SetupState::default()
            .with_game_type(GameType::SingerName)
            .with_game_type(GameType::Lyrics)
            .with_category(Category::Pop)
            .with_category(Category::Eurovision);
        assert_eq!(state.game_type(), Some(GameType::Lyrics));
        assert_eq!(state.category(), Some(Category::Eurovision));
    }

    #[test]
    fn test_transitions_do_not_mutate_receiver() {
        let base = SetupState::default();
        let _ = base.with_category(Category::Pop);
        assert_eq!(base.category(), None);
    }

    #[test]
    fn test_search_resets_custom_option() {
        let state = SetupState::default()
            .with_search(SearchOption::CustomGame)
            .with_custom(CustomGameOption::Join);
        assert_eq!(state.custom(), Some(CustomGameOption::Join));
        let state = state.with_search(SearchOption::FindGame);
        assert_eq!(state.custom(), None);
        assert!(state.can_find_game());
    }

    #[test]
    fn test_reset_keeps_name() {
        let state = SetupState::new("Alice")
            .with_game_type(GameType::Lyrics)
            .with_search(SearchOption::FindGame)
            .reset_selections();
        assert_eq!(state.player_name(), "Alice");
        assert_eq!(state.game_type(), None);
        assert_eq!(state.search(), None);
    }

    #[test]
    fn test_create_request_requires_selections() {
        let state = SetupState::new("Alice").with_game_type(GameType::Lyrics);
        assert_eq!(state.create_request(), Err(SetupError::MissingSelection));
    }

    #[test]
    fn test_create_request_trims_name() {
        let req = SetupState::new("  Alice ")
            .with_game_type(GameType::ArtistName)
            .with_category(Category::Arabesque)
            .with_search(SearchOption::FindGame)
            .create_request()
            .unwrap();
        assert_eq!(req.player_name, "Alice");
        assert_eq!(req.selected_category, Category::Arabesque);
        assert_eq!(req.selected_custom_game_option, None);
    }

    #[test]
    fn test_wire_values_round_trip_through_serde() {
        for t in GameType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.wire_value()));
        }
        for c in Category::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.wire_value()));
        }
        for s in SearchOption::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.wire_value()));
        }
    }
}

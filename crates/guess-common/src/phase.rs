/// Which screen the client is on. Local UI state only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPhase {
    #[default]
    Setup,
    Waiting,
    Playing,
}

impl ScreenPhase {
    pub fn enter_waiting(self) -> Self {
        match self {
            ScreenPhase::Setup => ScreenPhase::Waiting,
            other => other,
        }
    }

    pub fn on_ready_acknowledged(self) -> Self {
        match self {
            ScreenPhase::Waiting => ScreenPhase::Playing,
            other => other,
        }
    }

    pub fn back(self) -> Self {
        ScreenPhase::Setup
    }
}

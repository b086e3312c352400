use rand::seq::SliceRandom;
use rand::Rng;

pub const DEMO_VIDEO_ID: &str = "xEjOU731SFc";
pub const ANSWER_COUNT: usize = 4;

// -- Round State --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRound {
    pub video_id: String,
    pub options: [String; ANSWER_COUNT],
    pub correct: usize,
    pub score: u32,
    pub players_visible: bool,
}

impl GameRound {
    pub fn new(video_id: impl Into<String>, options: [String; ANSWER_COUNT], correct: usize) -> Self {
        Self {
            video_id: video_id.into(),
            options,
            correct: correct.min(ANSWER_COUNT - 1),
            score: 0,
            players_visible: false,
        }
    }

    /// Placeholder round used until the backend serves real questions.
    pub fn demo() -> Self {
        Self::new(
            DEMO_VIDEO_ID,
            [
                "Option 1".to_string(),
                "Option 2".to_string(),
                "Option 3".to_string(),
                "Option 4".to_string(),
            ],
            0,
        )
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?autoplay=1", self.video_id)
    }

    /// Returns a copy with the options reordered; `correct` follows the right answer.
    pub fn shuffled(&self, rng: &mut impl Rng) -> Self {
        let mut order: Vec<usize> = (0..ANSWER_COUNT).collect();
        order.shuffle(rng);

        let options = std::array::from_fn(|i| self.options[order[i]].clone());
        let correct = order
            .iter()
            .position(|&orig| orig == self.correct)
            .unwrap_or(self.correct);

        Self {
            options,
            correct,
            ..self.clone()
        }
    }

    /// Scores an answer. `None` if `index` is not a valid option.
    pub fn answer(&mut self, index: usize) -> Option<bool> {
        if index >= ANSWER_COUNT {
            return None;
        }
        let is_correct = index == self.correct;
        if is_correct {
            self.score += 1;
        }
        Some(is_correct)
    }

    pub fn toggle_players(&mut self) {
        self.players_visible = !self.players_visible;
    }
}

impl Default for GameRound {
    fn default() -> Self {
        Self::demo()
    }
}

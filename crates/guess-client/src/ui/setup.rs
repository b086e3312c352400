use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use guess_common::setup::{Category, CustomGameOption, GameType, SearchOption, SetupState};

use super::alert::Alert;

const CUSTOM_ACTIONS: [&str; 2] = ["Create Custom Game", "Join Custom Game"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupRow {
    Type,
    Category,
    Search,
    Custom,
}

impl SetupRow {
    fn title(&self) -> &'static str {
        match self {
            SetupRow::Type => "Game Type",
            SetupRow::Category => "Category",
            SetupRow::Search => "Find a Game",
            SetupRow::Custom => "Custom Game",
        }
    }

    fn labels(&self) -> Vec<&'static str> {
        match self {
            SetupRow::Type => GameType::ALL.iter().map(|t| t.label()).collect(),
            SetupRow::Category => Category::ALL.iter().map(|c| c.label()).collect(),
            SetupRow::Search => SearchOption::ALL.iter().map(|s| s.label()).collect(),
            SetupRow::Custom => CUSTOM_ACTIONS.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetupScreen {
    pub state: SetupState,
    pub focus: SetupRow,
    pub cursor: usize,
    pub pending: bool,
}

impl SetupScreen {
    pub fn new(state: SetupState) -> Self {
        Self {
            state,
            focus: SetupRow::Type,
            cursor: 0,
            pending: false,
        }
    }

    /// Swaps in a new snapshot, keeping focus on a row that still exists.
    pub fn set_state(&mut self, state: SetupState) {
        self.state = state;
        if !self.rows().contains(&self.focus) {
            self.focus = SetupRow::Search;
            self.cursor = self.selected_index(SetupRow::Search).unwrap_or(0);
        }
    }

    pub fn rows(&self) -> Vec<SetupRow> {
        let mut rows = vec![SetupRow::Type, SetupRow::Category, SetupRow::Search];
        if self.state.search() == Some(SearchOption::CustomGame) {
            rows.push(SetupRow::Custom);
        }
        rows
    }

    fn selected_index(&self, row: SetupRow) -> Option<usize> {
        match row {
            SetupRow::Type => self
                .state
                .game_type()
                .and_then(|t| GameType::ALL.iter().position(|x| *x == t)),
            SetupRow::Category => self
                .state
                .category()
                .and_then(|c| Category::ALL.iter().position(|x| *x == c)),
            SetupRow::Search => self
                .state
                .search()
                .and_then(|s| SearchOption::ALL.iter().position(|x| *x == s)),
            SetupRow::Custom => self.state.custom().map(|CustomGameOption::Join| 1),
        }
    }

    fn focus_row(&mut self, row: SetupRow) {
        self.focus = row;
        self.cursor = self.selected_index(row).unwrap_or(0);
    }

    pub fn select_next_row(&mut self) {
        let rows = self.rows();
        let idx = rows.iter().position(|r| *r == self.focus).unwrap_or(0);
        self.focus_row(rows[(idx + 1) % rows.len()]);
    }

    pub fn select_prev_row(&mut self) {
        let rows = self.rows();
        let idx = rows.iter().position(|r| *r == self.focus).unwrap_or(0);
        let prev = if idx == 0 { rows.len() - 1 } else { idx - 1 };
        self.focus_row(rows[prev]);
    }

    pub fn move_right(&mut self) {
        let count = self.focus.labels().len();
        self.cursor = (self.cursor + 1) % count;
    }

    pub fn move_left(&mut self) {
        let count = self.focus.labels().len();
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
    }

    /// Applies the highlighted option. Returns an alert for options that only
    /// inform the player.
    pub fn select(&mut self) -> Option<Alert> {
        let next = match self.focus {
            SetupRow::Type => self.state.with_game_type(GameType::ALL[self.cursor]),
            SetupRow::Category => self.state.with_category(Category::ALL[self.cursor]),
            SetupRow::Search => self.state.with_search(SearchOption::ALL[self.cursor]),
            SetupRow::Custom if self.cursor == 0 => return Some(Alert::custom_game()),
            SetupRow::Custom => self.state.with_custom(CustomGameOption::Join),
        };
        self.set_state(next);
        None
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .split(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Name field
                Constraint::Min(10),   // Option groups
                Constraint::Length(2), // Status
                Constraint::Length(2), // Help
            ])
            .split(horizontal[1]);

        // Title
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "  GUESS THE SONG ",
                Style::default()
                    .fg(Color::Rgb(255, 165, 0))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "- Welcome to Music Guess!",
                Style::default().fg(Color::Rgb(180, 180, 200)),
            ),
        ]));
        frame.render_widget(title, chunks[0]);

        // Name field
        let name_style = if self.state.is_editing() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let name_title = if self.state.is_editing() {
            " Player Name [Enter] Save "
        } else {
            " Player Name [e] Edit "
        };
        let name_input = Paragraph::new(self.state.displayed_name()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(name_style)
                .title(name_title),
        );
        frame.render_widget(name_input, chunks[1]);

        // Option groups
        let mut lines: Vec<Line> = Vec::new();
        for row in self.rows() {
            let focused = row == self.focus && !self.state.is_editing();
            lines.push(Line::from(Span::styled(
                format!("  {}", row.title()),
                Style::default()
                    .fg(if focused {
                        Color::Rgb(255, 220, 50)
                    } else {
                        Color::Rgb(180, 180, 200)
                    })
                    .add_modifier(Modifier::BOLD),
            )));

            let selected = self.selected_index(row);
            let mut spans = vec![Span::raw("    ")];
            for (idx, label) in row.labels().into_iter().enumerate() {
                let mut style = if selected == Some(idx) {
                    Style::default()
                        .fg(Color::Rgb(255, 165, 0))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Rgb(150, 150, 170))
                };
                if focused && idx == self.cursor {
                    style = style.bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!("[{}]", label), style));
                spans.push(Span::raw("  "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if self.state.can_find_game() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("[g]", Style::default().fg(Color::Rgb(100, 255, 150))),
                Span::styled(" Find Game", Style::default().fg(Color::Rgb(200, 200, 220))),
            ]));
        }

        let groups = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(80, 80, 100))),
        );
        frame.render_widget(groups, chunks[2]);

        // Status
        if self.pending {
            let status = Paragraph::new("  Looking for a lobby...")
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(status, chunks[3]);
        }

        // Help
        let help = Paragraph::new(
            "  [j/k] Group  [h/l] Option  [Enter] Select  [e] Edit name  [?] Help  [q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);

        if self.state.is_editing() {
            let name_len = self.state.displayed_name().chars().count() as u16;
            frame.set_cursor_position((chunks[1].x + name_len + 1, chunks[1].y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_type_and_category() {
        let mut screen = SetupScreen::new(SetupState::default());
        screen.move_right();
        assert!(screen.select().is_none());
        assert_eq!(screen.state.game_type(), Some(GameType::Lyrics));

        screen.select_next_row();
        assert_eq!(screen.focus, SetupRow::Category);
        screen.move_left();
        screen.select();
        assert_eq!(screen.state.category(), Some(Category::Arabesque));
    }

    #[test]
    fn test_custom_row_appears_with_custom_search() {
        let mut screen = SetupScreen::new(SetupState::default());
        assert_eq!(screen.rows().len(), 3);
        screen.set_state(screen.state.with_search(SearchOption::CustomGame));
        assert_eq!(screen.rows().last(), Some(&SetupRow::Custom));
    }

    #[test]
    fn test_custom_create_shows_alert() {
        let mut screen =
            SetupScreen::new(SetupState::default().with_search(SearchOption::CustomGame));
        screen.focus_row(SetupRow::Custom);
        assert_eq!(screen.select(), Some(Alert::custom_game()));

        screen.move_right();
        assert!(screen.select().is_none());
        assert_eq!(screen.state.custom(), Some(CustomGameOption::Join));
    }

    #[test]
    fn test_focus_leaves_removed_custom_row() {
        let mut screen =
            SetupScreen::new(SetupState::default().with_search(SearchOption::CustomGame));
        screen.focus_row(SetupRow::Custom);
        screen.set_state(screen.state.with_search(SearchOption::FindGame));
        assert_eq!(screen.focus, SetupRow::Search);
        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut screen = SetupScreen::new(SetupState::default());
        screen.select_prev_row();
        assert_eq!(screen.focus, SetupRow::Search);
        screen.select_next_row();
        assert_eq!(screen.focus, SetupRow::Type);
    }

    #[test]
    fn test_cursor_follows_selection() {
        let mut screen =
            SetupScreen::new(SetupState::default().with_category(Category::Eurovision));
        screen.focus_row(SetupRow::Category);
        assert_eq!(screen.cursor, 2);
    }
}

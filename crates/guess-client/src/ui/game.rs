use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use guess_common::game::GameRound;
use guess_common::lobby::Lobby;

#[derive(Debug, Clone)]
pub struct GameScreen {
    pub lobby: Lobby,
    pub round: GameRound,
    pub last_answer: Option<bool>,
}

impl GameScreen {
    pub fn new(lobby: Lobby, round: GameRound) -> Self {
        Self {
            lobby,
            round,
            last_answer: None,
        }
    }

    pub fn answer(&mut self, index: usize) {
        if let Some(correct) = self.round.answer(index) {
            self.last_answer = Some(correct);
        }
    }

    pub fn toggle_players(&mut self) {
        self.round.toggle_players();
    }

    pub fn status_text(&self) -> Option<&'static str> {
        self.last_answer
            .map(|correct| if correct { "Correct!" } else { "Wrong answer" })
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Video
                Constraint::Min(4),    // Players
                Constraint::Length(7), // Options
                Constraint::Length(2), // Status + help
            ])
            .split(area);

        // Title
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "  GUESS THE SONG ",
                Style::default()
                    .fg(Color::Rgb(255, 165, 0))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("- Lobby {}", self.lobby.id),
                Style::default().fg(Color::Rgb(180, 180, 200)),
            ),
            Span::styled(
                format!("   Score: {}", self.round.score),
                Style::default()
                    .fg(Color::Rgb(255, 220, 50))
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Rgb(60, 60, 80))),
        );
        frame.render_widget(title, chunks[0]);

        // Video
        let video = Paragraph::new(vec![
            Line::from(Span::styled(
                "  Now playing:",
                Style::default().fg(Color::Rgb(120, 120, 140)),
            )),
            Line::from(Span::styled(
                format!("  {}", self.round.embed_url()),
                Style::default().fg(Color::Rgb(100, 200, 255)),
            )),
        ])
        .wrap(Wrap { trim: false });
        frame.render_widget(video, chunks[1]);

        // Players (collapsible)
        let header = if self.round.players_visible {
            " Players [p] Hide "
        } else {
            " Players [p] Show "
        };
        let player_lines: Vec<Line> = if self.round.players_visible {
            self.lobby
                .players
                .iter()
                .map(|p| {
                    Line::from(Span::styled(
                        format!("  {}", p.name),
                        Style::default().fg(Color::Rgb(150, 255, 150)),
                    ))
                })
                .collect()
        } else {
            Vec::new()
        };
        let players = Paragraph::new(player_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
                .title(header)
                .title_style(Style::default().fg(Color::Rgb(180, 180, 200))),
        );
        frame.render_widget(players, chunks[2]);

        // Options
        let mut option_lines = vec![
            Line::from(Span::styled(
                "  Which one is correct?",
                Style::default()
                    .fg(Color::Rgb(200, 200, 220))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (row, opts) in self.round.options.chunks(2).enumerate() {
            let spans: Vec<Span> = opts
                .iter()
                .enumerate()
                .flat_map(|(col, label)| {
                    let n = row * 2 + col + 1;
                    vec![
                        Span::styled(
                            format!("  [{}] ", n),
                            Style::default().fg(Color::Rgb(255, 165, 0)),
                        ),
                        Span::styled(
                            format!("{:<24}", label),
                            Style::default().fg(Color::Rgb(200, 200, 220)),
                        ),
                    ]
                })
                .collect();
            option_lines.push(Line::from(spans));
        }
        let options = Paragraph::new(option_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(80, 80, 100))),
        );
        frame.render_widget(options, chunks[3]);

        // Status + help
        let mut spans = vec![Span::raw("  ")];
        if let Some(text) = self.status_text() {
            let color = if self.last_answer == Some(true) {
                Color::Rgb(100, 255, 150)
            } else {
                Color::Rgb(255, 100, 100)
            };
            spans.push(Span::styled(format!("{} | ", text), Style::default().fg(color)));
        }
        spans.push(Span::styled(
            "[1-4] Answer  [p] Players  [Esc] Main Menu  [q] Quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[4]);
    }
}

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use guess_common::lobby::{Lobby, LobbyId, LobbyView, EMPTY_LOBBY_PLACEHOLDER};

#[derive(Debug, Clone)]
pub struct WaitingScreen {
    pub player_id: String,
    pub player_name: String,
    pub created_lobby: LobbyId,
    pub view: LobbyView,
    pub last_changed: Option<DateTime<Local>>,
    pub ready_pending: bool,
}

impl WaitingScreen {
    pub fn new(player_id: String, player_name: String, created_lobby: LobbyId) -> Self {
        Self {
            player_id,
            player_name,
            created_lobby,
            view: LobbyView::default(),
            last_changed: None,
            ready_pending: false,
        }
    }

    /// Replaces the snapshot. Returns `false` and changes nothing when the
    /// poll brought the same lobby again.
    pub fn apply_snapshot(&mut self, lobby: Lobby) -> bool {
        let changed = self.view.apply(lobby);
        if changed {
            self.last_changed = Some(Local::now());
        }
        changed
    }

    /// Lobby to report readiness for: the polled one if any, else the one we created.
    pub fn ready_lobby_id(&self) -> LobbyId {
        self.view
            .current()
            .map(|l| l.id.clone())
            .unwrap_or_else(|| self.created_lobby.clone())
    }

    /// Snapshot handed to the game view.
    pub fn game_lobby(&self) -> Lobby {
        self.view
            .current()
            .cloned()
            .unwrap_or_else(|| Lobby::new(self.created_lobby.clone(), Vec::new()))
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Min(14),
                Constraint::Percentage(15),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(vertical[1]);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(6),    // Lobby
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
                "- Waiting Room",
                Style::default().fg(Color::Rgb(180, 180, 200)),
            ),
        ]));
        frame.render_widget(title, chunks[0]);

        // Lobby
        let lines: Vec<Line> = match self.view.current() {
            Some(lobby) => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled("  Lobby ID: ", Style::default().fg(Color::Rgb(120, 120, 140))),
                        Span::styled(
                            lobby.id.to_string(),
                            Style::default()
                                .fg(Color::Rgb(100, 200, 255))
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        "  Players:",
                        Style::default().fg(Color::Rgb(120, 120, 140)),
                    )),
                ];
                lines.extend(lobby.players.iter().map(|p| {
                    let color = if p.id == self.player_id || p.name == self.player_name {
                        Color::Rgb(255, 220, 50)
                    } else {
                        Color::Rgb(150, 255, 150)
                    };
                    Line::from(Span::styled(format!("    {}", p.name), Style::default().fg(color)))
                }));
                lines
            }
            None => vec![Line::from(Span::styled(
                format!("  {}", EMPTY_LOBBY_PLACEHOLDER),
                Style::default().fg(Color::Rgb(150, 150, 170)),
            ))],
        };

        let lobby_widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
                .title(" Players in Lobby ")
                .title_style(Style::default().fg(Color::Rgb(180, 180, 200))),
        );
        frame.render_widget(lobby_widget, chunks[1]);

        // Status
        let status = if self.ready_pending {
            "  Sending ready status...".to_string()
        } else if let Some(ts) = self.last_changed {
            format!("  The game is about to start. Last update {}", ts.format("%H:%M:%S"))
        } else {
            "  The game is about to start, please wait...".to_string()
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Rgb(100, 255, 150))),
            chunks[2],
        );

        // Help
        let help = Paragraph::new(Line::from(vec![
            Span::raw("  "),
            Span::styled("[Enter]", Style::default().fg(Color::Rgb(100, 255, 150))),
            Span::styled(" Ready  ", Style::default().fg(Color::Rgb(120, 120, 140))),
            Span::styled("[Esc]", Style::default().fg(Color::Rgb(255, 150, 100))),
            Span::styled(" Main Menu  ", Style::default().fg(Color::Rgb(120, 120, 140))),
            Span::styled("[q]", Style::default().fg(Color::Rgb(255, 150, 100))),
            Span::styled(" Quit", Style::default().fg(Color::Rgb(120, 120, 140))),
        ]));
        frame.render_widget(help, chunks[3]);
    }
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use guess_common::phase::ScreenPhase;

/// Blocking message box. Input is swallowed until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn invalid_name() -> Self {
        Self::new("Invalid name", "Name must be between 3 and 25 characters.")
    }

    pub fn missing_selection() -> Self {
        Self::new("Missing selection", "Please make sure every option is selected.")
    }

    pub fn request_failed() -> Self {
        Self::new("Error", "The lobby request failed.")
    }

    pub fn custom_game() -> Self {
        Self::new("Create custom game", "Custom game setup is not available yet.")
    }
}

pub fn draw_alert(frame: &mut Frame, alert: &Alert) {
    let popup_area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", alert.message),
            Style::default().fg(Color::Rgb(200, 200, 220)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to continue",
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(255, 150, 100)))
            .title(format!(" {} ", alert.title))
            .title_style(
                Style::default()
                    .fg(Color::Rgb(255, 220, 50))
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(paragraph, popup_area);
}

pub fn draw_help_popup(frame: &mut Frame, phase: ScreenPhase) {
    let popup_area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let controls: &[(&str, &str)] = match phase {
        ScreenPhase::Setup => &[
            ("[e]", "Edit player name ([Enter] saves)"),
            ("[j]/[k]", "Move between option groups"),
            ("[h]/[l]", "Move within a group"),
            ("[Enter]", "Select highlighted option"),
            ("[g]", "Find a game (with Find Game selected)"),
            ("[q]", "Quit"),
        ],
        ScreenPhase::Waiting => &[
            ("[Enter]/[r]", "Tell the lobby you are ready"),
            ("[Esc]/[b]", "Back to the main menu"),
            ("[q]", "Quit"),
        ],
        ScreenPhase::Playing => &[
            ("[1]-[4]", "Pick an answer"),
            ("[p]", "Show/hide players"),
            ("[Esc]/[b]", "Back to the main menu"),
            ("[q]", "Quit"),
        ],
    };

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.push(Line::from(Span::styled(
        "  CONTROLS",
        Style::default()
            .fg(Color::Rgb(100, 255, 150))
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for (key, desc) in controls {
        lines.push(Line::from(vec![
            Span::styled(
                format!("    {:<14}", key),
                Style::default().fg(Color::Rgb(200, 200, 220)),
            ),
            Span::styled(*desc, Style::default().fg(Color::Rgb(150, 150, 170))),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(Color::Rgb(100, 100, 120)),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(100, 200, 255)))
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(255, 220, 50))
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

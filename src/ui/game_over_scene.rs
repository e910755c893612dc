use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tanks::GameEngine;

pub fn draw_game_over(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let progress = engine.progression();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Game Over",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "You reached Level {}, Encounter {}",
            progress.level, progress.encounter
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Restart Game",
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

mod battle_scene;
mod game_over_scene;
mod shop_scene;
mod tank_display;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tanks::{GameEngine, GameMode};

/// UI-only state that the engine does not track.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Tank highlighted in the shop (roster index).
    pub shop_cursor: usize,
    /// Last rejected command, shown in the footer until the next key press.
    pub status: Option<String>,
}

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, engine: &GameEngine, view: &ViewState) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Scene
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, chunks[0], engine);

    match engine.mode() {
        GameMode::Shop => shop_scene::draw_shop(frame, chunks[1], engine, view),
        GameMode::Battle => battle_scene::draw_battle(frame, chunks[1], engine),
        GameMode::GameOver => game_over_scene::draw_game_over(frame, chunks[1], engine),
    }

    draw_footer(frame, chunks[2], engine, view);
}

fn draw_header(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let progress = engine.progression();
    let gold_color = if progress.gold < 0 {
        Color::Red
    } else {
        Color::Yellow
    };

    let header = Line::from(vec![
        Span::styled(
            "Tank Game",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Level {} - Encounter {}   ",
            progress.level, progress.encounter
        )),
        Span::styled(
            format!("Gold: {}", progress.gold),
            Style::default().fg(gold_color).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(header)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, engine: &GameEngine, view: &ViewState) {
    let line = match &view.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            controls_hint(engine.mode()),
            Style::default().fg(Color::DarkGray),
        )),
    };

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn controls_hint(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Shop => "[Up/Down] Tank  [A] +ATK  [D] +DEF  [R] Repair  [Enter] Start Battle  [Q] Quit",
        GameMode::Battle => "[Left/Right] Target  [M] Machine Gun  [C] Cannon  [S] Missile  [R] Repair  [Q] Quit",
        GameMode::GameOver => "[Enter] Restart  [Q] Quit",
    }
}

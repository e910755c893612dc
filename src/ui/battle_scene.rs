use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tanks::{GameEngine, TurnPhase};

use super::tank_display::{draw_enemy_tank, draw_player_tank};

const TANK_CARD_HEIGHT: u16 = 4;

/// Draws the battle: both rosters side by side, the action prompt and the log.
pub fn draw_battle(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let card_rows = engine.players().len().max(engine.enemies().len()) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(card_rows * TANK_CARD_HEIGHT), // Tanks
            Constraint::Length(4),                            // Action prompt
            Constraint::Min(3),                               // Battle log
        ])
        .split(area);

    draw_rosters(frame, chunks[0], engine);
    draw_action_prompt(frame, chunks[1], engine);
    draw_log(frame, chunks[2], engine);
}

fn card_slots(area: Rect, count: usize) -> Vec<Rect> {
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Length(TANK_CARD_HEIGHT))
        .collect();
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn draw_rosters(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let active = match engine.phase() {
        TurnPhase::PlayerTurn { active } => Some(active),
        _ => None,
    };
    let players = engine.players();
    for (i, slot) in card_slots(sides[0], players.len()).into_iter().enumerate() {
        draw_player_tank(frame, slot, &players[i], active == Some(i));
    }

    let enemies = engine.enemies();
    let selected = engine.selected_target();
    for (i, slot) in card_slots(sides[1], enemies.len()).into_iter().enumerate() {
        draw_enemy_tank(frame, slot, &enemies[i], i == selected);
    }
}

fn weapon_span(label: &str, enabled: bool, color: Color) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label.to_string(), style)
}

fn draw_action_prompt(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let lines = match (engine.phase(), engine.active_unit()) {
        (TurnPhase::PlayerTurn { .. }, Some(unit)) if unit.hp > 0.0 => {
            let target = engine
                .enemies()
                .get(engine.selected_target())
                .map(|e| e.name())
                .unwrap_or_default();
            let cannon = if unit.cooldown > 0 {
                format!("[C] Cannon (CD: {})", unit.cooldown)
            } else {
                "[C] Cannon".to_string()
            };
            let mut weapons = vec![
                weapon_span("[M] Machine Gun", true, Color::Yellow),
                Span::raw("  "),
                weapon_span(&cannon, unit.cooldown == 0, Color::Red),
            ];
            if engine.special_weapon_available(unit.id) {
                weapons.push(Span::raw("  "));
                weapons.push(weapon_span("[S] Missile", true, Color::Magenta));
            }
            vec![
                Line::from(format!("{}'s turn - target: {}", unit.name(), target)),
                Line::from(weapons),
            ]
        }
        (TurnPhase::PlayerTurn { .. }, Some(unit)) => {
            vec![Line::from(format!("{} is destroyed", unit.name()))]
        }
        (TurnPhase::EnemyTurn, _) => vec![Line::from(Span::styled(
            "Enemy turn...",
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ))],
        (TurnPhase::Victory, _) => vec![Line::from(Span::styled(
            "Victory! Returning to shop...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))],
        _ => vec![Line::from("")],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Battle "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_log(frame: &mut Frame, area: Rect, engine: &GameEngine) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = engine
        .log()
        .iter()
        .take(visible)
        .map(|entry| Line::from(entry.as_str()))
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(paragraph, area);
}

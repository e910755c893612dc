use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tanks::{EnemyUnit, PlayerUnit};

fn hp_color(hp: f64, max_hp: f64) -> Color {
    let ratio = hp_ratio(hp, max_hp);
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn hp_ratio(hp: f64, max_hp: f64) -> f64 {
    if max_hp <= 0.0 {
        return 0.0;
    }
    (hp / max_hp).clamp(0.0, 1.0)
}

/// Draws one tank card: stats line above an HP gauge.
#[allow(clippy::too_many_arguments)]
fn draw_tank_card(
    frame: &mut Frame,
    area: Rect,
    title: Line,
    border: Color,
    stats: Line,
    hp: f64,
    max_hp: f64,
    bar_color: Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(stats), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(bar_color))
        .label(format!("HP: {}/{}", hp, max_hp))
        .ratio(hp_ratio(hp, max_hp));
    frame.render_widget(gauge, rows[1]);
}

pub fn draw_player_tank(frame: &mut Frame, area: Rect, unit: &PlayerUnit, is_active: bool) {
    let destroyed = unit.hp <= 0.0;
    let border = if is_active {
        Color::Yellow
    } else if destroyed {
        Color::DarkGray
    } else {
        Color::Green
    };
    let mut title = vec![Span::styled(
        format!(" {} (Lv {}) ", unit.name(), unit.level),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    if destroyed {
        title.push(Span::styled("DESTROYED ", Style::default().fg(Color::Red)));
    }

    let stats = Line::from(format!(
        "ATK: {} | DEF: {} | CD: {} | Kills: {}",
        unit.atk, unit.def, unit.cooldown, unit.kills
    ));

    draw_tank_card(
        frame,
        area,
        Line::from(title),
        border,
        stats,
        unit.hp,
        unit.max_hp,
        hp_color(unit.hp, unit.max_hp),
    );
}

pub fn draw_enemy_tank(frame: &mut Frame, area: Rect, enemy: &EnemyUnit, is_selected: bool) {
    let border = if enemy.hp <= 0.0 {
        Color::DarkGray
    } else if is_selected {
        Color::Yellow
    } else {
        Color::Red
    };
    let marker = if is_selected && enemy.hp > 0.0 { "> " } else { "" };
    let title = Line::from(Span::styled(
        format!(" {}{} ", marker, enemy.name()),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    let stats = Line::from(format!("ATK: {} | DEF: {}", enemy.atk, enemy.def));

    draw_tank_card(
        frame,
        area,
        title,
        border,
        stats,
        enemy.hp,
        enemy.max_hp,
        Color::Red,
    );
}

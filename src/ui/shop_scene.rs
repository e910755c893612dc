use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tanks::core::constants::MAX_UPGRADES_PER_STAT;
use tanks::units::upgrade_count;
use tanks::{GameEngine, PlayerUnit, Stat};

use super::ViewState;

/// Draws the upgrade shop: one card per tank plus the start prompt.
pub fn draw_shop(frame: &mut Frame, area: Rect, engine: &GameEngine, view: &ViewState) {
    let players = engine.players();
    let mut constraints: Vec<Constraint> = players.iter().map(|_| Constraint::Length(7)).collect();
    constraints.push(Constraint::Min(0));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Upgrade Shop ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let cost = engine.config().upgrade_cost;
    let gold = engine.progression().gold;
    for (i, unit) in players.iter().enumerate() {
        draw_shop_card(frame, rows[i], unit, i == view.shop_cursor, gold >= cost, cost);
    }

    let prompt = Paragraph::new(Line::from(Span::styled(
        "Press [Enter] to start the battle",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(prompt, rows[players.len()]);
}

/// Five pips, filled for each purchased upgrade.
fn upgrade_pips(unit: &PlayerUnit, stat: Stat, color: Color) -> Vec<Span<'static>> {
    let bought = upgrade_count(unit, stat);
    let mut spans: Vec<Span<'static>> = (0..MAX_UPGRADES_PER_STAT)
        .map(|i| {
            if i < bought {
                Span::styled("■", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("□", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    spans.push(Span::styled(format!(" {}", stat.label()), Style::default().fg(color)));
    spans
}

fn purchase_hint(unit: &PlayerUnit, stat: Stat, affordable: bool, cost: i64) -> Span<'static> {
    let maxed = upgrade_count(unit, stat) >= MAX_UPGRADES_PER_STAT;
    let key = match stat {
        Stat::Atk => 'A',
        Stat::Def => 'D',
    };
    let text = if maxed {
        format!("{} maxed", stat.label())
    } else {
        format!("[{}] +5 {} ({}g)", key, stat.label(), cost)
    };
    let style = if maxed || !affordable {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(text, style)
}

fn draw_shop_card(
    frame: &mut Frame,
    area: Rect,
    unit: &PlayerUnit,
    is_selected: bool,
    affordable: bool,
    cost: i64,
) {
    let border = if is_selected {
        Color::Yellow
    } else {
        Color::Gray
    };

    let mut pips = upgrade_pips(unit, Stat::Atk, Color::Blue);
    pips.push(Span::raw("    "));
    pips.extend(upgrade_pips(unit, Stat::Def, Color::Green));

    let lines = vec![
        Line::from(format!(
            "HP: {} | ATK: {} | DEF: {} | Level {}",
            unit.hp, unit.atk, unit.def, unit.level
        )),
        Line::from(pips),
        Line::from(""),
        Line::from(vec![
            purchase_hint(unit, Stat::Atk, affordable, cost),
            Span::raw("   "),
            purchase_hint(unit, Stat::Def, affordable, cost),
        ]),
    ];

    let title = if is_selected {
        format!(" > {} ", unit.name())
    } else {
        format!(" {} ", unit.name())
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

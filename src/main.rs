mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tanks::build_info::version_string;
use tanks::{CommandError, GameConfig, GameEngine, GameMode, Stat, Weapon};
use ui::{draw_ui, ViewState};

const INPUT_POLL_MS: u64 = 50;

/// What the main loop should do after a key press.
enum Flow {
    Continue,
    Quit,
}

/// A delayed engine call the loop fires once its moment arrives.
#[derive(Default)]
struct Schedule {
    enemy_turn_at: Option<Instant>,
    shop_at: Option<Instant>,
}

impl Schedule {
    /// Arm or clear timers from the engine's readiness signals and fire the
    /// ones that are due.
    fn run_due(&mut self, engine: &mut GameEngine, now: Instant) -> Result<(), CommandError> {
        let config = engine.config().clone();

        if engine.enemy_turn_ready() {
            let due = *self
                .enemy_turn_at
                .get_or_insert(now + Duration::from_millis(config.enemy_turn_delay_ms));
            if now >= due {
                self.enemy_turn_at = None;
                engine.resolve_enemy_turn()?;
            }
        } else {
            self.enemy_turn_at = None;
        }

        if engine.victory_pending() {
            let due = *self
                .shop_at
                .get_or_insert(now + Duration::from_millis(config.victory_delay_ms));
            if now >= due {
                self.shop_at = None;
                engine.return_to_shop()?;
            }
        } else {
            self.shop_at = None;
        }
        Ok(())
    }
}

fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    args.windows(2)
        .find(|pair| pair[0] == "--config")
        .map(|pair| PathBuf::from(&pair[1]))
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("tanks {}", version_string());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Tanks - turn-based tank battles\n");
                println!("Usage: tanks [--config FILE]\n");
                println!("Options:");
                println!("  --config FILE  Load game settings from a JSON file");
                println!("  --version      Show version information");
                println!("  --help         Show this help message");
                return Ok(());
            }
            "--config" => {}
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'tanks --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = match parse_config_arg(&args) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut engine = GameEngine::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut engine);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut GameEngine,
) -> io::Result<()> {
    let mut view = ViewState::default();
    let mut schedule = Schedule::default();
    let mut rng = rand::thread_rng();

    loop {
        terminal.draw(|f| draw_ui(f, engine, &view))?;

        if let Err(e) = schedule.run_due(engine, Instant::now()) {
            view.status = Some(e.to_string());
        }

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if let Flow::Quit = handle_key(key_event, engine, &mut view, &mut rng) {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_key(
    key: KeyEvent,
    engine: &mut GameEngine,
    view: &mut ViewState,
    rng: &mut impl rand::Rng,
) -> Flow {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return Flow::Quit;
    }
    view.status = None;

    let result = match engine.mode() {
        GameMode::Shop => handle_shop_key(key.code, engine, view, rng),
        GameMode::Battle => handle_battle_key(key.code, engine),
        GameMode::GameOver => match key.code {
            KeyCode::Enter => engine.restart_game(),
            _ => Ok(()),
        },
    };

    if let Err(e) = result {
        view.status = Some(e.to_string());
    }
    Flow::Continue
}

fn handle_shop_key(
    code: KeyCode,
    engine: &mut GameEngine,
    view: &mut ViewState,
    rng: &mut impl rand::Rng,
) -> Result<(), CommandError> {
    let roster_len = engine.players().len();
    let selected_id = engine
        .players()
        .get(view.shop_cursor)
        .map(|u| u.id)
        .unwrap_or(1);

    match code {
        KeyCode::Up => {
            view.shop_cursor = view.shop_cursor.saturating_sub(1);
            Ok(())
        }
        KeyCode::Down => {
            if view.shop_cursor + 1 < roster_len {
                view.shop_cursor += 1;
            }
            Ok(())
        }
        KeyCode::Char('a') | KeyCode::Char('A') => engine.purchase_upgrade(selected_id, Stat::Atk),
        KeyCode::Char('d') | KeyCode::Char('D') => engine.purchase_upgrade(selected_id, Stat::Def),
        KeyCode::Char('r') | KeyCode::Char('R') => engine.repair_unit(selected_id),
        KeyCode::Enter => engine.start_battle(rng),
        _ => Ok(()),
    }
}

fn handle_battle_key(code: KeyCode, engine: &mut GameEngine) -> Result<(), CommandError> {
    let enemy_count = engine.enemies().len();
    match code {
        KeyCode::Left | KeyCode::Up => {
            cycle_target(engine, enemy_count, enemy_count.saturating_sub(1));
            Ok(())
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
            cycle_target(engine, enemy_count, 1);
            Ok(())
        }
        KeyCode::Char('m') | KeyCode::Char('M') => engine.attack_selected(Weapon::Light).map(|_| ()),
        KeyCode::Char('c') | KeyCode::Char('C') => engine.attack_selected(Weapon::Heavy).map(|_| ()),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            engine.attack_selected(Weapon::Special).map(|_| ())
        }
        KeyCode::Char('r') | KeyCode::Char('R') => match engine.active_unit().map(|u| u.id) {
            Some(id) => engine.repair_unit(id),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Step the selection by `step` slots, skipping destroyed enemies.
fn cycle_target(engine: &mut GameEngine, enemy_count: usize, step: usize) {
    if enemy_count == 0 {
        return;
    }
    let mut index = engine.selected_target();
    for _ in 0..enemy_count {
        index = (index + step) % enemy_count;
        if engine.select_target(index).is_ok() {
            return;
        }
    }
}

// crates/market-terminal/src/main.rs

mod app;
mod components;
mod config;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use market_core::Direction;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::{App, Field, InputMode, Panel};
use crate::config::TerminalConfig;

const DEBUG_LOG_FILE: &str = "market-terminal.log";

#[derive(Parser)]
#[clap(name = "market-terminal")]
#[clap(about = "Simulated trading dashboard for the terminal")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// Starting paper balance
    #[clap(short, long)]
    balance: Option<f64>,

    /// Price tick period in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// Asset id to select on startup
    #[clap(short, long)]
    asset: Option<String>,

    /// Enable debug logging (to market-terminal.log unless --log-file is given)
    #[clap(short, long)]
    debug: bool,

    /// Write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut TerminalConfig) {
        let sim = &mut config.simulation;
        if let Some(seed) = self.seed {
            sim.seed = Some(seed);
        }
        if let Some(balance) = self.balance {
            sim.starting_balance = balance;
        }
        if let Some(ms) = self.tick_ms {
            sim.tick_interval_ms = ms;
        }
        if let Some(asset) = &self.asset {
            config.initial_asset = Some(asset.clone());
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
        if self.debug {
            config.logging.level = "debug".to_string();
            if config.logging.file.is_none() {
                config.logging.file = Some(PathBuf::from(DEBUG_LOG_FILE));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TerminalConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    // Setup logging
    if let Some(path) = &config.logging.file {
        init_logging(path, &config.logging.level)?;
    }

    let mut app = App::new(&config.simulation)?;
    if let Some(id) = &config.initial_asset {
        app.select_asset_by_id(id)?;
    }

    info!(
        assets = app.registry.len(),
        tick_ms = config.simulation.tick_interval_ms,
        seed = ?config.simulation.seed,
        "starting market terminal"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.simulation.tick_interval()).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "terminal loop failed");
        println!("Error: {:?}", err);
    }

    info!(orders = app.dashboard.order_count(), "market terminal stopped");
    Ok(())
}

/// The terminal owns stdout, so logs always go to a file.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut events = EventStream::new();

    let mut prices = interval_at(Instant::now() + tick, tick);
    prices.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let deadline = app.load_deadline();
        let chart_load = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key);
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            _ = prices.tick() => {
                app.on_tick();
            }
            _ = chart_load => {
                app.finish_chart_load();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            // Global hotkeys
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                app.should_quit = true;
            }
            KeyCode::Tab => {
                app.next_panel();
            }
            KeyCode::BackTab => {
                app.prev_panel();
            }
            KeyCode::F(1) => {
                app.toggle_help();
            }
            KeyCode::Esc if app.show_help => {
                app.toggle_help();
            }

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_selection_down();
            }
            KeyCode::Enter if app.current_panel == Panel::Orders => {
                app.place_order();
            }
            KeyCode::Enter => {
                app.select_highlighted();
            }

            // Asset list
            KeyCode::Char('/') => {
                app.start_editing(Field::Search);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                app.cycle_category();
            }

            // Chart
            KeyCode::Char('[') => {
                app.prev_timeframe();
            }
            KeyCode::Char(']') | KeyCode::Char('t') | KeyCode::Char('T') => {
                app.next_timeframe();
            }

            // Order entry
            KeyCode::Char('b') | KeyCode::Char('B') => {
                app.set_direction(Direction::Buy);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                app.set_direction(Direction::Sell);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                app.increase_amount();
            }
            KeyCode::Char('-') => {
                app.decrease_amount();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                app.start_editing(Field::Amount);
            }
            KeyCode::Char('p') => {
                app.toggle_take_profit();
            }
            KeyCode::Char('l') => {
                app.toggle_stop_loss();
            }
            KeyCode::Char('P') => {
                app.start_editing(Field::TakeProfit);
            }
            KeyCode::Char('L') => {
                app.start_editing(Field::StopLoss);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                app.place_order();
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                app.cancel_selected_order();
            }

            _ => {}
        },

        InputMode::Editing(_) => match key.code {
            KeyCode::Enter => {
                app.submit_input();
            }
            KeyCode::Esc => {
                app.cancel_input();
            }
            KeyCode::Backspace => {
                app.delete_char();
            }
            KeyCode::Char(c) => {
                app.enter_char(c);
            }
            _ => {}
        },

        InputMode::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm_pending(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_pending(false);
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::SimulationSettings;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        let settings = SimulationSettings {
            seed: Some(21),
            volatility_prompt_probability: 0.0,
            ..SimulationSettings::default()
        };
        App::new(&settings).unwrap()
    }

    #[test]
    fn keyboard_order_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.selected_asset().unwrap().id, "eth-usdt");

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('o'));

        let order = app.dashboard.orders().next().unwrap();
        assert_eq!(order.direction, Direction::Sell);
        assert_eq!(order.amount, 110.0);
        assert_eq!(order.asset_symbol, "ETH/USDT");
    }

    #[test]
    fn typed_amount_goes_through_input_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Editing(Field::Amount));

        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "250".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.form.amount(), 250.0);
    }

    #[test]
    fn search_keys_do_not_trigger_hotkeys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.filter.query, "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter.query, "");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn cli_flags_beat_config() {
        let cli = Cli::parse_from([
            "market-terminal",
            "--seed",
            "5",
            "--tick-ms",
            "250",
            "--asset",
            "gold",
            "--debug",
        ]);
        let mut config = TerminalConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.simulation.seed, Some(5));
        assert_eq!(config.simulation.tick_interval_ms, 250);
        assert_eq!(config.initial_asset.as_deref(), Some("gold"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from(DEBUG_LOG_FILE)));
        config.validate().unwrap();
    }
}

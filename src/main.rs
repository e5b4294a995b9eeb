use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use connect_four::config::{AppConfig, LoggingConfig};
use connect_four::game::{Engine, GameMode};
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Two,
}

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the game mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the computer player's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Override the first player's name
    #[arg(long)]
    name: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let (config, fell_back) = resolve_config(&cli)?;

    init_logging(&config.logging)?;
    if fell_back {
        // Logging was not up while the config was read, so report it now.
        eprintln!(
            "config file {} not found, using defaults",
            cli.config.display()
        );
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    info!(mode = ?config.session.mode, "starting connect four");

    let engine = Engine::from_config(&config.session).context("creating game engine")?;
    run(engine).context("running terminal UI")
}

/// Load the config file (or defaults when it is missing) and apply CLI
/// overrides. The flag is set when defaults were used.
fn resolve_config(cli: &Cli) -> Result<(AppConfig, bool)> {
    let loaded = AppConfig::load_if_present(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let fell_back = loaded.is_none();
    let mut config = loaded.unwrap_or_default();

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        config.session.mode = match mode {
            ModeArg::Single => GameMode::SinglePlayer,
            ModeArg::Two => GameMode::TwoPlayer,
        };
    }
    if let Some(seed) = cli.seed {
        config.session.seed = Some(seed);
    }
    if let Some(name) = &cli.name {
        config.session.first_player = name.clone();
    }
    config.validate().context("validating configuration")?;
    Ok((config, fell_back))
}

/// Log to a file so output does not interfere with the TUI.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let log_file = std::fs::File::create(&logging.file)
        .with_context(|| format!("creating log file {}", logging.file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

fn run(engine: Engine) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(engine);
    let res = app.run(&mut terminal);

    // Restore terminal even when the app returned an error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

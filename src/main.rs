use std::fs::File;
use std::io;
use std::path::PathBuf;

use ai_game_suite::ai::Tier;
use ai_game_suite::config::{AppConfig, LoggingConfig};
use ai_game_suite::session::Session;
use ai_game_suite::ui::App;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::LevelFilter;
use ratatui::{Terminal, backend::CrosstermBackend};

/// Play Tic-Tac-Toe, Rock-Paper-Scissors, and Connect 4 against the computer.
#[derive(Parser)]
#[command(name = "ai_game_suite", about = "Classic games against AI opponents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed every AI for reproducible play
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty highlighted in each game's menu (naive, biased, minimax, rl)
    #[arg(long, default_value = "naive")]
    tier: String,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_logging(&config.logging);

    let session = Session::open(&config, cli.seed);
    let mut app = App::new(session).with_preferred_tier(Tier::from_name_or_naive(&cli.tier));
    let res = run_terminal(&mut app);

    app.into_session().close();
    res.context("terminal UI failed")
}

/// Log to a file; the terminal belongs to the UI. Returns false, after a
/// warning on stderr, when no logger could be installed.
fn init_logging(config: &LoggingConfig) -> bool {
    match try_init_logging(config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: {e:#}, continuing without a log file");
            false
        }
    }
}

fn try_init_logging(config: &LoggingConfig) -> Result<()> {
    let level = config.level_filter().unwrap_or(LevelFilter::Info);
    let file = File::create(&config.file)
        .with_context(|| format!("creating log file {}", config.file.display()))?;
    let log_config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::WriteLogger::init(level, log_config, file).context("initializing logger")
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_file_does_not_stop_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: dir.path().join("missing").join("ai_game_suite.log"),
            level: "info".to_string(),
        };
        assert!(try_init_logging(&config).is_err());
        assert!(!init_logging(&config));
    }

    #[test]
    fn test_tier_flag_parses_names() {
        let cli = Cli::parse_from(["ai_game_suite", "--tier", "minimax"]);
        assert_eq!(Tier::from_name_or_naive(&cli.tier), Tier::Minimax);

        let cli = Cli::parse_from(["ai_game_suite"]);
        assert_eq!(Tier::from_name_or_naive(&cli.tier), Tier::Naive);

        let cli = Cli::parse_from(["ai_game_suite", "--tier", "grandmaster"]);
        assert_eq!(Tier::from_name_or_naive(&cli.tier), Tier::Naive);
    }
}

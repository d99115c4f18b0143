mod app;
mod input;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use diskfill::config::Config;
use diskfill::logging::{self, LogTarget};
use diskfill::{Mode, Session};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diskfill", about = "Fill a disk with one temp file, then clear it", version = "0.1")]
struct Cli {
    /// Fill the disk now (leaves 100 MiB free), print the status and exit
    #[arg(long, conflicts_with_all = ["clear", "status", "json", "config"])]
    fill: bool,

    /// Delete the temp file, print the status and exit
    #[arg(long, conflicts_with_all = ["status", "json", "config"])]
    clear: bool,

    /// Print the current status and exit
    #[arg(long)]
    status: bool,

    /// Print the current status as JSON and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Directory for the temp file (overrides the config file)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Write logs to this file (the interactive UI logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load();

    if cli.config {
        return run_print_config(&cfg, cli.dir.as_deref());
    }

    let interactive = !(cli.fill || cli.clear || cli.status || cli.json);
    match (&cli.log_file, interactive) {
        (Some(path), _)  => logging::init(LogTarget::File(path), &cfg.log.level)?,
        (None, false)    => logging::init(LogTarget::Stderr, &cfg.log.level)?,
        (None, true)     => {}
    }

    let dir = cfg.temp_dir(cli.dir.as_deref());
    let mut session = Session::open(&dir, &cfg.general.file_name)?;

    if cli.fill {
        return run_once(&mut session, Mode::Fill);
    }
    if cli.clear {
        return run_once(&mut session, Mode::Clear);
    }
    if cli.status {
        print!("{}", session.status());
        return Ok(());
    }
    if cli.json {
        return run_json(&session);
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(session, cfg.tick_ms());
    restore_terminal()?;
    result
}

/// Run `mode` once if the session is in it; a session already in the other
/// mode has nothing to do.
fn run_once(session: &mut Session, mode: Mode) -> Result<()> {
    if session.mode() != mode {
        match mode {
            Mode::Fill => {
                eprintln!("Temp file already filled at {} - clear it first.", session.path().display());
                std::process::exit(1);
            }
            Mode::Clear => {
                print!("{}", session.status());
                return Ok(());
            }
        }
    }

    match session.run() {
        Ok(status) => {
            print!("{}", status);
            Ok(())
        }
        Err(e) if e.is_insufficient_space() => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn run_json(session: &Session) -> Result<()> {
    use serde_json::json;

    let status = session.status();
    let snapshot = json!({
        "diskfill_version": "0.1",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "temp_file": session.path(),
        "mode":      session.mode().label(),
        "status":    status,
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(cfg: &Config, dir_override: Option<&std::path::Path>) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  temp_dir  = {}", cfg.temp_dir(dir_override).display());
    println!("  file_name = {}", cfg.general.file_name);
    println!();
    println!("[ui]");
    println!("  tick_ms   = {}", cfg.tick_ms());
    println!();
    println!("[log]");
    println!("  level     = {}", cfg.log.level);
    Ok(())
}

fn run(session: Session, tick_ms: u64) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(session, tick_ms);
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

//! Casement headless entry point.
//!
//! Drives one browser window from the console. Commands are read line by
//! line from a script file (second argument) or stdin, either in console
//! syntax (`open <url>`, `back`, `close <id>`, ...) or as JSON IPC messages.
//! The first argument, or `CASEMENT_CONFIG`, names a TOML window config.

mod console;
mod session;

use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

use casement_core::{WindowCommand, WindowConfig};
use session::Session;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting Casement (home: {})", config.home_url);

    let mut session = Session::new(config);
    println!("{}", session.chrome().status_line());

    let input: Box<dyn BufRead> = match std::env::args().nth(2) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("cannot open script {path}"))?;
            Box::new(BufReader::new(file))
        },
        None => Box::new(io::stdin().lock()),
    };

    for line in input.lines() {
        let line = line.context("reading input")?;
        let cmd = match WindowCommand::parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {e}");
                continue;
            },
        };
        match session.execute(cmd) {
            Ok(lines) => {
                for l in lines {
                    println!("{l}");
                }
            },
            Err(e) => println!("error: {e}"),
        }
        if session.is_closed() {
            break;
        }
    }

    if !session.is_closed() {
        session.execute(WindowCommand::Quit)?;
    }
    if !session.chrome().view().window_closed {
        log::warn!("Window controller stopped without a teardown request");
    }
    log::info!(
        "Casement shut down cleanly ({} tabs created)",
        session.controller().created_count()
    );
    Ok(())
}

/// Resolve the window config from the CLI argument, `CASEMENT_CONFIG`, or
/// the built-in defaults.
fn load_config() -> Result<WindowConfig> {
    let path = std::env::args()
        .nth(1)
        .filter(|p| p != "-")
        .or_else(|| std::env::var("CASEMENT_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => WindowConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(WindowConfig::default()),
    }
}

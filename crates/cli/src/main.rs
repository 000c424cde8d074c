//! chessgame CLI
//!
//! Play chess in the terminal, one command per line.

use anyhow::Context;
use chess_cli::{CliConfig, Outcome, Session, parse_command, render_board};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("chessgame");
    println!();
    println!("Usage:");
    println!("  chessgame [--config <path>] [--load <path>]");
    println!();
    println!("Options:");
    println!("  --config, -c <path>   TOML settings file");
    println!("  --load, -l <path>     resume a saved game");
    println!();
    println!("Type `help` once running for the list of commands.");
}

struct Args {
    config: Option<PathBuf>,
    load: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Args>> {
    let mut parsed = Args {
        config: None,
        load: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            "--load" | "-l" => {
                let path = args.get(i + 1).context("--load needs a path")?;
                parsed.load = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => anyhow::bail!("unknown argument `{other}`"),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    // The log filter comes from the config, so problems reading it are
    // reported once logging is up.
    let (config, config_error) = match &args.config {
        Some(path) => match CliConfig::load(path) {
            Ok(config) => (config, None),
            Err(e) => (CliConfig::default(), Some(e)),
        },
        None => (CliConfig::default(), None),
    };
    init_logging(&config.log_filter);
    match (&args.config, config_error) {
        (_, Some(e)) => warn!("{e:#}; using default settings"),
        (Some(path), None) => info!(path = %path.display(), "config loaded"),
        (None, None) => {}
    }

    let mut session = Session::new(config);
    if let Some(path) = &args.load {
        session.load(path)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", render_board(session.game()))?;
    writeln!(stdout, "Type `help` for commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            }
        };

        match session.execute(cmd) {
            Ok(Outcome::Continue(text)) => writeln!(stdout, "{text}")?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                error!("{e:#}");
                writeln!(stdout, "Error: {e:#}")?;
            }
        }
    }

    Ok(())
}

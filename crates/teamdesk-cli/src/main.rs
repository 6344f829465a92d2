//! teamdesk - command-line front-end for school team and event rosters.
//!
//! Lists teams and events, shows which students can still be added to an
//! event, and enrolls a team roster and/or individual students in one go.

mod args;
mod commands;

use std::io;

use anyhow::Result;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teamdesk_core::{ApiClient, Config};

use args::Command;

/// Directory for the optional daily log file
const LOG_DIR_ENV: &str = "TEAMDESK_LOG_DIR";

/// Initialize the tracing subscriber for logging.
///
/// Always logs to stderr; also logs to a daily file when `TEAMDESK_LOG_DIR`
/// is set. The returned guard must live until exit so the file gets flushed.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "teamdesk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let command = match args::parse(&raw_args) {
        Ok(Command::Help) => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, args::USAGE);
            std::process::exit(2);
        }
    };
    debug!(?command, "Parsed command");

    if let Command::Init {
        api_url,
        school_id,
        token,
    } = command
    {
        let path = Config::config_path()?;
        let config = commands::init_config(&path, api_url, school_id, token)?;
        println!("Wrote {}", path.display());
        println!("  API:    {}", config.api_base_url());
        match config.school_id {
            Some(id) => println!("  School: {}", id),
            None => println!("  School: (not set)"),
        }
        return Ok(());
    }

    let config = Config::load()?;
    let api = ApiClient::from_config(&config)?;
    let school_id = config.school_id()?;
    info!(school_id, base_url = api.base_url(), "teamdesk starting");

    match command {
        Command::Teams {
            search,
            sort,
            descending,
        } => commands::list_teams(&api, school_id, &search, sort, descending).await,
        Command::Events {
            search,
            status,
            sort,
            descending,
        } => commands::list_events(&api, school_id, &search, status.as_deref(), sort, descending).await,
        Command::Pool {
            event_id,
            class_name,
            search,
        } => commands::show_pool(&api, school_id, event_id, class_name.as_deref(), &search).await,
        Command::Enroll {
            event_id,
            team_id,
            student_ids,
        } => commands::enroll(&api, school_id, event_id, team_id, &student_ids).await,
        Command::Init { .. } | Command::Help => Ok(()),
    }
}

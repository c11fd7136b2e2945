mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use rollcall_core::rules::SessionState;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::commands::{completions, lookup, session, volunteers, Context};
use crate::error::{exit_code_for, report_error};
use crate::util::now_utc_millis;
use rollcall_config as config;
use rollcall_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about = "rollcall volunteer registry")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a volunteer
    Add(volunteers::AddArgs),
    /// Resolve a postal code to an address without saving anything
    Lookup(lookup::LookupArgs),
    List(volunteers::ListArgs),
    Remove(volunteers::RemoveArgs),
    /// Delete every registered volunteer
    Clear(volunteers::ClearArgs),
    Session(session::SessionArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        debug!(path = %db_path.display(), "database path resolved");
    }

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let session = store
        .session()
        .check_and_touch(now_utc_millis(), app_config.session_timeout_secs)
        .with_context(|| "update session activity")?;
    if session.state == SessionState::Expired {
        info!("session expired, starting a new one");
    }

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
        session,
    };

    match command {
        Command::Add(args) => volunteers::add_volunteer(&ctx, args),
        Command::Lookup(args) => lookup::lookup_address(&ctx, args),
        Command::List(args) => volunteers::list_volunteers(&ctx, args),
        Command::Remove(args) => volunteers::remove_volunteer(&ctx, args),
        Command::Clear(args) => volunteers::clear_volunteers(&ctx, args),
        Command::Session(args) => session::show_session(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

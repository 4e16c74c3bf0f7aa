//! lapstock CLI
//!
//! Command-line front end for normalizing and maintaining the catalogs of a
//! laptop inventory.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, ExpenseAction};
pub(crate) use error::CliError;

/// Emit an empty line through the logger so `--quiet` and `--logfile` apply.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    match cli.command {
        Commands::Init => commands::init::run_init(db),
        Commands::Seed { dir } => commands::seed::run_seed(db, dir),
        Commands::Resolve {
            json,
            fields,
            apply_to,
        } => commands::resolve::run_resolve(db, json, &fields, apply_to),
        Commands::Merge {
            kind,
            source,
            target,
        } => commands::merge::run_merge(db, kind, source, target),
        Commands::Activate { kind, id } => {
            commands::activation::run_set_active(db, kind, id, true)
        }
        Commands::Deactivate { kind, id } => {
            commands::activation::run_set_active(db, kind, id, false)
        }
        Commands::Stats { json } => commands::stats::run_stats(db, json),
        Commands::List {
            kind,
            search,
            parent,
            page,
        } => commands::list::run_list(db, kind, search, parent, page),
        Commands::Search { query, kind } => commands::search::run_search(db, &query, kind),
        Commands::Expense { action } => match action {
            ExpenseAction::NextDue {
                due,
                frequency,
                today,
                paid,
                advance_days,
            } => commands::expense::run_next_due(due, frequency, today, paid, advance_days),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(db);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(&path),
        },
    }
}

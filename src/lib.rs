//! rTimeclock library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use crate::core::app::App;
use crate::core::router::{Resolution, resolve};
use chrono::{DateTime, Local};
use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use db::log::ttlog_quiet;
use errors::{AppError, AppResult};
use utils::time::resolve_now;

/// Central command dispatcher: gates the command's view through the router,
/// then runs its handler.
pub fn dispatch(cli: &Cli, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Resolution::Redirect(_) = resolve(cli.command.route(), app.auth.is_authenticated()) {
        return Err(AppError::NotAuthenticated);
    }

    match &cli.command {
        Commands::Init | Commands::Config { .. } => Ok(()),
        Commands::Log { .. } => commands::log::handle(&cli.command, app),
        Commands::Register { .. } => commands::register::handle(&cli.command, app),
        Commands::Login { .. } => commands::login::handle(&cli.command, app, now),
        Commands::Logout => commands::logout::handle(app),
        Commands::Profile { .. } => commands::profile::handle(&cli.command, app),
        Commands::Password { .. } => commands::password::handle(&cli.command, app, now),
        Commands::In { .. } => commands::clock::handle_in(&cli.command, app, now),
        Commands::Out => commands::clock::handle_out(app, now),
        Commands::Pause { .. } => commands::pause::handle_pause(&cli.command, app, now),
        Commands::Resume => commands::pause::handle_resume(app, now),
        Commands::Status { .. } => commands::status::handle(&cli.command, app, now),
        Commands::Report { .. } => commands::report::handle(&cli.command, app, now),
        Commands::History { .. } => commands::history::handle(&cli.command, app, now),
        Commands::Edit { .. } => commands::edit::handle(&cli.command, app),
        Commands::Del { .. } => commands::del::handle(&cli.command, app),
        Commands::Users { .. } => commands::users::handle(&cli.command, app, now),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let now = resolve_now(cli.now.as_ref())?;

    // `init` creates what every other command needs
    if let Commands::Init = cli.command {
        return commands::init::handle(&cli);
    }

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    if let Commands::Config { .. } = cli.command {
        return commands::config::handle(&cli.command, &cfg);
    }

    let mut app = App::open(cfg)?;
    app.init(now)?;

    let result = dispatch(&cli, &mut app, now);

    if let Err(e) = &result
        && e.is_store_failure()
    {
        ttlog_quiet(&app.pool.conn, "store_error", cli.command.route(), &e.to_string());
    }

    result
}

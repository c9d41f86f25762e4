use crate::export::ExportFormat;
use crate::models::break_kind::BreakKind;
use crate::models::role::Role;
use crate::models::status::SessionStatus;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimeclock
/// CLI application to clock in and out, track breaks and report worked time
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A time clock CLI: clock in/out, track breaks and report worked time using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the current instant ("YYYY-MM-DD HH:MM[:SS]" local, or RFC 3339)
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        /// Only rows of this operation (e.g. clock_in, edit, del)
        #[arg(long = "op")]
        operation: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "name")]
        full_name: String,

        /// Job title
        #[arg(long = "job")]
        job_title: Option<String>,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the cached profile
    Logout,

    /// Show or update the signed-in user's profile
    Profile {
        #[arg(long = "name")]
        full_name: Option<String>,

        #[arg(long = "job")]
        job_title: Option<String>,
    },

    /// Change the password, or reset a forgotten one
    Password {
        /// New password (signed in), or the password to set with --code
        #[arg(long = "new")]
        new_password: Option<String>,

        /// Request a reset code for this email
        #[arg(long = "forgot", conflicts_with_all = ["code", "new_password"])]
        forgot: Option<String>,

        /// Reset code received from --forgot
        #[arg(long = "code", requires = "new_password")]
        code: Option<String>,
    },

    /// Clock in: start today's work session
    In {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Keep the live clock on screen until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// Clock out: complete today's work session
    Out,

    /// Start a break
    Pause {
        /// Break kind (default from config)
        #[arg(long, value_enum)]
        kind: Option<BreakKind>,
    },

    /// End the current break
    Resume,

    /// Show today's session, break and totals
    Status {
        /// Refresh the live clock every second
        #[arg(long)]
        watch: bool,

        /// Stop watching after this many seconds
        #[arg(long = "for", requires = "watch", value_name = "SECONDS")]
        watch_for: Option<u64>,

        /// Print the status as JSON
        #[arg(long, conflicts_with = "watch")]
        json: bool,
    },

    /// Daily, weekly or monthly reports
    Report {
        #[command(subcommand)]
        period: ReportPeriod,
    },

    /// List past sessions with filters and pagination
    History {
        /// From date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// To date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        #[arg(long, value_enum)]
        status: Option<SessionStatus>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        page: i64,

        /// Rows per page (default from config)
        #[arg(long = "page-size", value_parser = clap::value_parser!(i64).range(1..=500))]
        page_size: Option<i64>,

        /// Another user's records (supervisors and admins)
        #[arg(long = "user")]
        user_email: Option<String>,

        /// Export the filtered rows instead of printing them
        #[arg(long, value_enum, requires = "file")]
        export: Option<ExportFormat>,

        /// Absolute path of the export file
        #[arg(long)]
        file: Option<String>,

        /// Overwrite the export file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Edit a past session (supervisors and admins)
    Edit {
        /// Session id (see `history`)
        id: i64,

        /// New clock-in time (HH:MM on the session date)
        #[arg(long = "in")]
        clock_in: Option<String>,

        /// New clock-out time (HH:MM on the session date)
        #[arg(long = "out")]
        clock_out: Option<String>,

        #[arg(long, value_enum)]
        status: Option<SessionStatus>,

        /// Reason for the change (mandatory)
        #[arg(long, short = 'j', default_value = "")]
        justification: String,
    },

    /// Delete a session and its breaks (admins)
    Del {
        /// Session id (see `history`)
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List accounts, change a role or issue a password reset code (admins)
    Users {
        /// Account whose role changes
        #[arg(long = "set-role", requires = "role", value_name = "EMAIL")]
        set_role: Option<String>,

        #[arg(long, value_enum)]
        role: Option<Role>,

        /// Issue a one-hour reset code for this account
        #[arg(long = "reset-code", value_name = "EMAIL", conflicts_with = "set_role")]
        reset_code: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportPeriod {
    /// One day (default today)
    Daily {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Seven days (default the current Sunday-to-Saturday week)
    Weekly {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
    },

    /// A calendar month (default the current one)
    Monthly {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },
}

impl Commands {
    /// Path token of the view the command belongs to.
    pub fn route(&self) -> &'static str {
        match self {
            Commands::Init | Commands::Config { .. } => "/",
            Commands::Register { .. } => "/register",
            Commands::Login { .. } | Commands::Logout => "/login",
            Commands::Password { forgot: Some(_), .. }
            | Commands::Password { code: Some(_), .. } => "/login",
            Commands::Profile { .. } | Commands::Password { .. } | Commands::Users { .. } => {
                "/profile"
            }
            Commands::In { .. }
            | Commands::Out
            | Commands::Pause { .. }
            | Commands::Resume
            | Commands::Status { .. } => "/dashboard",
            Commands::Report { .. } => "/reports",
            Commands::History { .. }
            | Commands::Edit { .. }
            | Commands::Del { .. }
            | Commands::Log { .. } => "/history",
        }
    }
}
